//! Maps decoded [`vtdecode::Event`]s onto `SoftTerm`'s operations.
//!
//! This is a direct translation of the `ControlCharacter`/`EscapeSequence`/
//! `ControlSequence` final-byte switches in the original state machine this
//! crate translates; case labels below are ordered and commented to match
//! that source, rather than grouped by Rust convenience, so the two can be
//! read side by side.

use vtdecode::{Args, Event};

use crate::host::Host;
use crate::state::SoftTerm;

impl<H: Host> SoftTerm<H> {
    /// Feeds one decoded event into the state machine. A driving loop pushes
    /// raw bytes through [`vtutf8::Utf8Decoder`] and [`vtdecode::Decoder`]
    /// first; every resulting [`Event`] is handed here in turn.
    pub fn feed_event(&mut self, event: Event<'_>) {
        match event {
            Event::Printable { character, shift_level, error } => {
                self.printable_character(character, shift_level, error);
            }
            Event::ControlCharacter(c) => self.control_character(c),
            Event::EscapeSequence { final_byte, first_intermediate } => {
                self.escape_sequence(final_byte, first_intermediate);
            }
            Event::ControlSequence { final_byte, last_intermediate, first_private_parameter, args } => {
                self.control_sequence(final_byte, last_intermediate, first_private_parameter, args);
            }
            Event::ControlString { introducer, data } => {
                tracing::trace!(introducer = %introducer, len = data.len(), "ignoring control string");
            }
        }
    }

    fn control_character(&mut self, character: char) {
        match character {
            '\0' => {}                                          // NUL
            '\u{05}' => {}                                       // ENQ: empty answerback
            '\u{07}' => {}                                       // BEL: TODO bell
            '\r' => self.carriage_return(),                      // CR
            '\u{85}' => {
                // NEL
                self.carriage_return_no_update();
                self.cursor_down(1, self.scrolling);
            }
            '\u{84}' | '\n' | '\u{0B}' | '\u{0C}' => self.cursor_down(1, self.scrolling), // IND/LF/VT/FF
            '\u{8D}' => self.cursor_up(1, self.scrolling),       // RI
            '\t' => self.horizontal_tab(1, true),                // TAB
            '\u{08}' => self.cursor_left(1, false),              // BS
            '\u{7F}' => self.delete_characters(1),               // DEL
            '\u{88}' => self.set_horizontal_tabstop(),           // HTS
            // ESC/CSI/SS2/SS3/CAN/DCS/OSC/PM/APC/SOS/ST are wholly dealt with
            // by the decoder and never surface here.
            _ => {}
        }
    }

    fn escape_sequence(&mut self, final_byte: char, first_intermediate: char) {
        match first_intermediate {
            '\0' => match final_byte {
                '6' => self.cursor_left(1, true),                           // DECBI
                '7' => self.dec_save_cursor(),                              // DECSC
                '8' => self.dec_restore_cursor(),                           // DECRC
                '9' => self.cursor_right(1, true),                          // DECFI
                '=' => self.host.set_calculator_application_mode(true),     // DECKPAM
                '>' => self.host.set_calculator_application_mode(false),    // DECKPNM
                'c' => self.reset_to_initial_state(),                      // RIS
                // '1'..='5', ':', ';', '<', '?' and the C1-set/ISO-2022
                // ranges are unimplemented or not applicable to this model.
                _ => {}
            },
            ' ' => match final_byte {
                'F' => self.host.set_8bit_control1(false), // S7C1T
                'G' => self.host.set_8bit_control1(true),  // S8C1T
                _ => {}
            },
            '#' => {
                if final_byte == '8' {
                    // DECALN
                    self.reset_margins();
                    self.home();
                    self.screen_alignment_pattern();
                }
            }
            // '!'/'"', '$', '%', and the G0-G3 designators ('(' ')' '*' '+'
            // '-' '.' '/') all assume ISO 2022 graphic sets, which this model
            // does not employ.
            _ => {}
        }
    }

    fn control_sequence(&mut self, character: char, last_intermediate: char, first_private_parameter: char, args: &Args) {
        match last_intermediate {
            '\0' => match first_private_parameter {
                '\0' => self.control_sequence_plain(character, args),
                '?' => self.control_sequence_dec_private(character, args),
                '>' => self.control_sequence_secondary_private(character, args),
                '=' => self.control_sequence_sco_private(character, args),
                _ => {}
            },
            '$' => match first_private_parameter {
                '\0' => match character {
                    '|' => self.set_columns_per_page(args),        // DECSCPP
                    'r' => self.change_area_attributes(args),      // DECCARA
                    'w' => self.send_presentation_state_report(args), // DECRQPSR
                    'y' | 'p' => {} // DECRPM/DECRQM: not implemented
                    _ => {}
                },
                '?' => match character {
                    'y' | 'p' => {} // DECRPM/DECRQM: not implemented
                    _ => {}
                },
                _ => {}
            },
            '*' => {
                if first_private_parameter == '\0' && character == '|' {
                    self.set_lines_per_page(args); // DECSNLS
                }
            }
            ' ' => {
                if first_private_parameter == '\0' {
                    match character {
                        '@' => self.scroll_left(u16::try_from(args.arg_zd_if_zero_one_if_empty(0)).unwrap_or(u16::MAX)), // SL
                        'A' => self.scroll_right(u16::try_from(args.arg_zd_if_zero_one_if_empty(0)).unwrap_or(u16::MAX)), // SR
                        'q' => self.set_cursor_style(args),                                    // DECSCUSR
                        // B-H, W: GSM/GSS/FNT/TSS/JFY/SPI/QUAD/FNK have no
                        // meaning for a virtual terminal.
                        _ => {}
                    }
                }
            }
            '!' => {
                if first_private_parameter == '\0' && character == 'p' {
                    self.soft_reset(); // DECSTR
                }
            }
            '\'' => {
                if first_private_parameter == '\0' {
                    let zd1 = u16::try_from(args.arg_zd_if_zero_one_if_empty(0)).unwrap_or(u16::MAX);
                    match character {
                        'z' => self.enable_locator_reports(true),  // DECELR
                        '{' => self.select_locator_events(args),   // DECSLE
                        '|' => self.request_locator_report(),      // DECRQLP
                        '}' => self.insert_columns(zd1),           // DECIC
                        '~' => self.delete_columns(zd1),           // DECDC
                        // 'w' (DECEFR) implies a multi-window model out of scope.
                        _ => {}
                    }
                }
            }
            _ => {}
        }
    }

    fn control_sequence_plain(&mut self, character: char, args: &Args) {
        let zd1 = u16::try_from(args.arg_zd_if_zero_one_if_empty(0)).unwrap_or(u16::MAX);
        match character {
            '@' => self.insert_characters(zd1),                                            // ICH
            'A' => self.cursor_up(zd1, false),                                              // CUU
            'B' => self.cursor_down(zd1, false),                                             // CUD
            'C' => self.cursor_right(zd1, false),                                            // CUF
            'D' => self.cursor_left(zd1, false),                                             // CUB
            'E' => {
                // CNL
                self.carriage_return_no_update();
                self.cursor_down(u16::try_from(args.arg_one_if_zero_or_empty(0)).unwrap_or(u16::MAX), false);
            }
            'F' => {
                // CPL
                self.carriage_return_no_update();
                self.cursor_up(u16::try_from(args.arg_one_if_zero_or_empty(0)).unwrap_or(u16::MAX), false);
            }
            'G' => self.goto_x(args.arg_one_if_zero_or_empty(0)),                            // CHA
            'H' => self.goto_yx(args.arg_one_if_zero_or_empty(0), args.arg_one_if_zero_or_empty(1)), // CUP
            'I' => self.horizontal_tab(zd1, true),                                           // CHT
            'J' => self.erase_in_display(args),                                              // ED
            'K' => self.erase_in_line(args),                                                 // EL
            'L' => self.insert_lines(zd1),                                                   // IL
            'M' => self.delete_lines(zd1),                                                   // DL
            // 'N' EF, 'O' EA: no applicability, there are no fields/areas.
            'P' => self.delete_characters(zd1),                                               // DCH
            // 'Q' SEE: no applicability, not a block-mode terminal.
            // 'R' CPR: meaningless as input.
            'S' => self.pan_up(zd1),                                                          // SU
            'T' => self.pan_down(zd1),                                                        // SD
            // 'U' NP, 'V' PP: no applicability, there are no pages.
            'W' => self.cursor_tabulation_control(args),                                      // CTC
            'X' => self.erase_characters(zd1),                                                // ECH
            'Y' => self.vertical_tab(zd1, true),                                              // CVT
            'Z' => self.backwards_horizontal_tab(zd1, true),                                  // CBT
            // '[' SRS, '\\' PTX, ']' SDS, '^' SIMD: not meaningful for a
            // virtual terminal.
            '`' => self.goto_x(args.arg_one_if_zero_or_empty(0)),                             // HPA
            'a' => self.cursor_right(zd1, false),                                             // HPR
            'b' => self.repeat_printable_character(u32::from(zd1)),                            // REP
            'c' => self.send_primary_device_attributes(),                                     // DA
            'd' => self.goto_y(args.arg_one_if_zero_or_empty(0)),                              // VPA
            'e' => self.cursor_down(zd1, false),                                               // VPR
            'f' => self.goto_yx(args.arg_one_if_zero_or_empty(0), args.arg_one_if_zero_or_empty(1)), // HVP
            'g' => self.tab_clear(args),                                                       // TBC
            'h' => self.set_mode(args, true),                                                  // SM
            // 'i' MC: no applicability, there are no auxiliary devices.
            'j' => self.cursor_left(zd1, false),                                               // HPB
            'k' => self.cursor_up(zd1, false),                                                 // VPB
            'l' => self.set_mode(args, false),                                                 // RM
            'm' => self.set_attributes(args),                                                  // SGR
            'n' => self.send_device_status_report(),                                           // DSR
            // 'o' DAQ: no applicability, not a block-mode terminal.
            // 'p' DECSR, 'q' DECLL: not implemented.
            'r' => self.set_top_bottom_margins(args),                                          // DECSTBM
            's' => self.sco_save_cursor_or_set_left_right_margins(args),                       // SCOSC/DECSLRM
            't' => self.set_lines_per_page_or_dtterm(args),                                    // DECSLPP
            'u' => self.dec_restore_cursor(),                                                  // SCORC
            // 'v' DECSVST, 'w' DECSHORP, 'y' DECTST, 'z' DECSVERP, '|'
            // DECTTC, '}' DECPRO, '~' DECFNK: not implemented/not applicable.
            'x' => self.set_sco_attributes(args),                                              // SCOSGR
            _ => {}
        }
    }

    fn control_sequence_dec_private(&mut self, character: char, args: &Args) {
        match character {
            'W' => self.dec_cursor_tabulation_control(args),   // DECCTC
            'c' => self.set_linux_cursor_type(args),           // LINUXSCUSR
            'h' => self.set_private_mode(args, true),          // DECSM
            'l' => self.set_private_mode(args, false),         // DECRM
            // 'm' XTQMODKEYS: not supported.
            'n' => self.send_private_device_status_report(args), // DECDSR
            _ => {}
        }
    }

    fn control_sequence_secondary_private(&mut self, character: char, _args: &Args) {
        match character {
            'c' => self.send_secondary_device_attributes(), // DECDA2
            // 'm' XTMODKEYS, 'n' XTDMODKEYS: not supported.
            _ => {}
        }
    }

    fn control_sequence_sco_private(&mut self, character: char, args: &Args) {
        match character {
            // 'A' SCOABG, 'B' SCOBLPD, 'D' SCOVGAI, 'E' SCOVGAB, 'F' SCOANFG,
            // 'G' SCOANBG, 'H' SCOARFG, 'I' SCOARBG, 'J' SCOAGFG, 'K' SCOAGBG,
            // 'L' SCOECM, 'M' SCORQC, 'g' SCOAG, 'x' C25SGR, 'z' C25VTSW,
            // 'T' C25MODE: not implemented, mostly because they do not match
            // this model's colour/erasure/graphics-set model.
            'C' | 'S' => self.set_sco_cursor_type(args), // SCOSCUSR / C25LSCURS
            'c' => self.send_tertiary_device_attributes(), // DECDA3
            'h' => self.set_sco_mode(args, true),          // SCOSM
            'l' => self.set_sco_mode(args, false),         // SCORM
            _ => {}
        }
    }

    /// `CSI s`: `SCOSC` (SCO console save-cursor) and `DECSLRM` (set left/
    /// right margins) share this final byte; xterm's resolution (and this
    /// emulator's) is that `DECSLRM` wins only when `DECLRMM` is on or the
    /// sequence carries an explicit argument, else it is plain `SCOSC`,
    /// which behaves the same as `DECSC`.
    fn sco_save_cursor_or_set_left_right_margins(&mut self, args: &Args) {
        if self.active_modes.left_right_margins || args.arg_count() > 0 {
            self.set_left_right_margins(args);
        } else {
            self.dec_save_cursor();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::NullHost;
    use pretty_assertions::assert_eq;

    fn parsed(values: &[u32]) -> Args {
        let mut args = Args::default();
        for &v in values {
            args.push_arg();
            for d in v.to_string().chars() {
                args.push_digit(d.to_digit(10).unwrap());
            }
        }
        args
    }

    #[test]
    fn control_character_cr_homes_column() {
        let mut t = SoftTerm::new(10, 5, NullHost::default());
        t.goto_yx(1, 5);
        t.feed_event(Event::ControlCharacter('\r'));
        assert_eq!(t.screen.cursor_pos(), (0, 0));
    }

    #[test]
    fn escape_ris_resets_to_80x25() {
        let mut t = SoftTerm::new(10, 5, NullHost::default());
        t.feed_event(Event::EscapeSequence { final_byte: 'c', first_intermediate: '\0' });
        assert_eq!((t.screen.width(), t.screen.height()), (80, 25));
    }

    #[test]
    fn csi_cup_moves_cursor_to_one_based_position() {
        let mut t = SoftTerm::new(10, 5, NullHost::default());
        let args = parsed(&[3, 4]);
        t.feed_event(Event::ControlSequence { final_byte: 'H', last_intermediate: '\0', first_private_parameter: '\0', args: &args });
        assert_eq!(t.screen.cursor_pos(), (3, 2));
    }

    #[test]
    fn csi_s_is_scosc_without_left_right_margins_or_args() {
        let mut t = SoftTerm::new(10, 5, NullHost::default());
        t.goto_yx(2, 2);
        let args = Args::default();
        t.feed_event(Event::ControlSequence { final_byte: 's', last_intermediate: '\0', first_private_parameter: '\0', args: &args });
        t.goto_yx(1, 1);
        t.feed_event(Event::EscapeSequence { final_byte: '8', first_intermediate: '\0' });
        assert_eq!(t.screen.cursor_pos(), (1, 1));
    }

    #[test]
    fn csi_private_h_sets_origin_mode() {
        let mut t = SoftTerm::new(10, 5, NullHost::default());
        let args = parsed(&[6]);
        t.feed_event(Event::ControlSequence { final_byte: 'h', last_intermediate: '\0', first_private_parameter: '?', args: &args });
        assert!(t.active_modes.origin);
    }
}
