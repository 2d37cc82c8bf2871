//! Reads raw bytes from stdin and prints the [`vtmsg::Message`]s `vtinput`
//! decodes them into: a non-interactive debugging tool, trimmed to the
//! pieces this workspace actually implements (no raw-mode tty handling, no
//! kitty-keyboard-protocol toggles; those belong to the keyboard/mouse
//! aggregation layer this suite treats as an external collaborator, §1).
//!
//! ```bash
//! printf '\x1b[A\x1b[<0;10;20M' | cargo run --example vtev -p vtio
//! ```

use std::io::Read;

fn main() {
    let mut bytes = Vec::new();
    std::io::stdin().read_to_end(&mut bytes).expect("read stdin");

    let mut decoder = vtinput::Decoder::new();
    decoder.feed(&bytes, &mut |message: vtmsg::Message| {
        println!("{message:?}");
    });
}
