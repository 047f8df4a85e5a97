//! Moves the print footer ("Retrieved from ...") into the visible footer list.
//!
//! The live skin hides `div.printfooter` with `display: none` and keeps it
//! apart from the real footer, separated by the category links.

use tracing::debug;

use crate::dom;
use crate::parse::Document;
use crate::selector::Selector;
use crate::{OfflineError, Result};

const PASS: &str = "fix_footer";

pub const PRINT_FOOTER: Selector<'static> = Selector::TagClass { tag: "div", class: "printfooter" };

pub const FOOTER_LIST: Selector<'static> = Selector::Id("f-list");

/// Element index in `#f-list` at which a `<br>` is inserted after the print
/// footer has been prepended.
///
/// This matches the footer template of the wiki skin (the break lands after
/// the print footer and the first two footer items). It is not derived from
/// the page and breaks silently if the template changes.
pub const FOOTER_BREAK_INDEX: usize = 3;

/// Turns `div.printfooter` into the first `<li>` of `#f-list` and inserts a
/// line break at [`FOOTER_BREAK_INDEX`].
///
/// Each node placed in the list is followed by a newline so the written
/// footer reads one item per line.
pub fn fix_footer(doc: &mut Document) -> Result<()> {
    let printfooter = doc
        .select_first(&PRINT_FOOTER)
        .ok_or_else(|| OfflineError::MissingElement { pass: PASS, selector: PRINT_FOOTER.to_string() })?;
    let footer_list = doc
        .select_first(&FOOTER_LIST)
        .ok_or_else(|| OfflineError::MissingElement { pass: PASS, selector: FOOTER_LIST.to_string() })?;

    if dom::contains(&printfooter, &footer_list) {
        return Err(OfflineError::InvalidStructure {
            pass: PASS,
            reason: format!("{FOOTER_LIST} is inside {PRINT_FOOTER}"),
        });
    }

    dom::remove_attr(&printfooter, "class");
    let item = doc.retag(&printfooter, "li");
    dom::insert_child(&footer_list, 0, &item);
    dom::insert_after(&item, &doc.create_text("\n"));

    let br = doc.create_element("br", &[]);
    dom::insert_at_element_index(&footer_list, FOOTER_BREAK_INDEX, &br);
    dom::insert_after(&br, &doc.create_text("\n"));

    debug!(break_index = FOOTER_BREAK_INDEX, "relocated print footer");
    Ok(())
}
