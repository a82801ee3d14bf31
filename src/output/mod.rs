//! Output module.
//!
//! Console rendering lives in `plain`; files written to the results
//! directory live in `report`.

mod plain;
pub mod report;

pub use plain::{
    host_info_lines, open_port_line, print_error, print_host_info, print_scan_header,
    print_success, print_summary, print_warning, ConsoleObserver, CONSOLE_NO_BANNER,
};
pub use report::{render_text, save_json, save_text, JsonReport};
