pub mod assets;
pub mod dom;
pub mod error;
pub mod fetch;
pub mod footer;
pub mod layout;
pub mod optimizer;
pub mod parse;
pub mod paths;
pub mod report;
pub mod selector;
pub mod strip;
pub mod write;

pub use assets::{
    FILE_NAMESPACE, LOCAL_STYLESHEET, LinkStats, WIKI_IMAGE_PREFIX, WIKI_LINK_PREFIX, replace_stylesheets,
    rewrite_image_source, rewrite_link, update_links,
};
pub use error::{OfflineError, Result};
pub use fetch::{FetchConfig, fetch_file, fetch_stdin, is_url};
#[cfg(feature = "fetch")]
pub use fetch::{fetch_source, fetch_url};
pub use footer::{FOOTER_BREAK_INDEX, fix_footer};
pub use layout::fix_layout;
pub use optimizer::Optimizer;
pub use parse::Document;
pub use paths::{OutputContext, relative_prefix};
pub use report::OptimizeReport;
pub use selector::{AttrPattern, Selector};
pub use strip::{StripStats, strip_page};
pub use write::write_document;
