//! Generates tofu fonts: every glyph a framed box showing the hexadecimal
//! code point of the character it stands in for.

use tofu::core;

fn main() {
    let cli_args = core::platform::get_cli_args();
    if let Err(error) = core::run_app(cli_args) {
        core::platform::handle_error(error);
    }
}
