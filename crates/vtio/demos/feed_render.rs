//! Feeds a fixed ECMA-48 byte stream through a [`vtio::Session`] and prints
//! the ECMA-48 bytes a realizer would write to reproduce the result.
//!
//! ```bash
//! cargo run --example feed_render -p vtio
//! ```
//!
//! Demonstrates the full producer → consumer round trip this crate wires
//! together: application bytes in, host terminal bytes out, with no real
//! terminal or separate process involved.

use std::collections::HashMap;
use std::io::Write;

use vterm_host::LoggingHost;
use vtio::Session;
use vttui::Options;

mod vterm_host {
    //! A [`vtterm::Host`] that just logs what it's asked to do, for demo
    //! output; a real producer would forward these to its own keyboard
    //! layer instead.
    #[derive(Debug, Default)]
    pub struct LoggingHost {
        pub log: Vec<String>,
    }

    impl vtterm::Host for LoggingHost {
        fn write_control1(&mut self, character: char) {
            self.log.push(format!("write_control1({character:?})"));
        }
        fn write_latin1(&mut self, text: &str) {
            self.log.push(format!("write_latin1({text:?})"));
        }
        fn set_8bit_control1(&mut self, on: bool) {
            self.log.push(format!("set_8bit_control1({on})"));
        }
        fn set_cursor_application_mode(&mut self, on: bool) {
            self.log.push(format!("set_cursor_application_mode({on})"));
        }
        fn set_calculator_application_mode(&mut self, on: bool) {
            self.log.push(format!("set_calculator_application_mode({on})"));
        }
        fn set_backspace_is_bs(&mut self, on: bool) {
            self.log.push(format!("set_backspace_is_bs({on})"));
        }
        fn set_escape_is_fs(&mut self, on: bool) {
            self.log.push(format!("set_escape_is_fs({on})"));
        }
        fn set_sco_function_keys(&mut self, on: bool) {
            self.log.push(format!("set_sco_function_keys({on})"));
        }
        fn set_dec_function_keys(&mut self, on: bool) {
            self.log.push(format!("set_dec_function_keys({on})"));
        }
        fn set_teken_function_keys(&mut self, on: bool) {
            self.log.push(format!("set_teken_function_keys({on})"));
        }
        fn request_dec_locator_report(&mut self) {
            self.log.push("request_dec_locator_report".to_string());
        }
        fn set_send_dec_locator(&mut self, on: bool) {
            self.log.push(format!("set_send_dec_locator({on})"));
        }
        fn set_send_dec_locator_press_event(&mut self, on: bool) {
            self.log.push(format!("set_send_dec_locator_press_event({on})"));
        }
        fn set_send_dec_locator_release_event(&mut self, on: bool) {
            self.log.push(format!("set_send_dec_locator_release_event({on})"));
        }
    }
}

fn main() {
    tracing_subscriber::fmt().with_env_filter(tracing_subscriber::EnvFilter::from_default_env()).init();

    let env: HashMap<String, String> = std::env::vars().collect();
    let cap = vtcap::detect(&env);

    let mut session = Session::new(40, 6, LoggingHost::default(), cap, Options::default(), false);
    session.feed(b"\x1b[2J\x1b[H\x1b[1mhello\x1b[0m, \x1b[38;2;10;20;30mworld\x1b[0m");

    let mut out = Vec::new();
    session.render(&mut out).expect("render never performs real I/O here");
    std::io::stdout().write_all(&out).expect("stdout write");
    println!();
}
