// Author: Dustin Pilgrim
// License: MIT

mod base;

pub use base::parse_str;
