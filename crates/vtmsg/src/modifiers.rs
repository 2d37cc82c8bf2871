use bitflags::bitflags;

bitflags! {
    /// Modifier keys in effect when a key or mouse message was generated.
    ///
    /// `LEVEL2`/`LEVEL3`/`GROUP2` name ISO/IEC 9995 keyboard shift levels
    /// rather than the familiar Shift/Alt/AltGr labels, following keyboard
    /// layout terms rather than physical keys for these modifier bitflags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Modifiers: u8 {
        const CONTROL = 0x01;
        const LEVEL2  = 0x02;
        const LEVEL3  = 0x04;
        const GROUP2  = 0x08;
        const SUPER   = 0x10;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bits_match_wire_format() {
        assert_eq!(Modifiers::CONTROL.bits(), 0x01);
        assert_eq!(Modifiers::LEVEL2.bits(), 0x02);
        assert_eq!(Modifiers::LEVEL3.bits(), 0x04);
        assert_eq!(Modifiers::GROUP2.bits(), 0x08);
        assert_eq!(Modifiers::SUPER.bits(), 0x10);
    }

    #[test]
    fn truncation_drops_unknown_bits() {
        assert_eq!(Modifiers::from_bits_truncate(0xFF), Modifiers::all());
    }
}
