pub mod duration;
pub mod time;
pub mod url;

pub use duration::{format_step, parse_duration};
pub use time::resolve_range;
pub use self::url::{add_scheme, parse_server_url};
