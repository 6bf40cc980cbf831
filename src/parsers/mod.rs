pub mod table;
pub mod video;


pub use table::{DEFAULT_TABLE_SELECTOR, collect_links};
pub use video::{MatcherChain, RegexMatcher, VideoMatch, VideoMatcher};
