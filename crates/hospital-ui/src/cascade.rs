//! State → district dropdown cascade.

use std::cell::RefCell;
use std::rc::Rc;

use crate::page::{EventKind, Page, PageEvent, PageNode, SelectOption};
use crate::regions::RegionMap;

pub const STATE_SELECT_ID: &str = "state";
pub const DISTRICT_SELECT_ID: &str = "district";

pub const SELECT_DISTRICT_LABEL: &str = "Select district";
pub const NO_DISTRICTS_LABEL: &str = "No districts configured";

/// Options shown in the district select once `state` is picked.
///
/// Always starts with a placeholder whose value is empty.
pub fn district_options(regions: &RegionMap, state: &str) -> Vec<SelectOption> {
    let districts = regions.districts(state);
    let placeholder = if districts.is_empty() {
        NO_DISTRICTS_LABEL
    } else {
        SELECT_DISTRICT_LABEL
    };
    std::iter::once(SelectOption::new("", placeholder))
        .chain(districts.iter().map(|district| SelectOption::same(district.as_str())))
        .collect()
}

/// Repopulate `#district` whenever `#state` changes.
///
/// `regions_url`, when set, is fetched once and replaces `regions` after it
/// arrives. Returns `false` when the page has no cascade: either select is
/// missing, or `#district` is a free-text field.
pub fn install<P: Page>(page: &Rc<P>, regions: RegionMap, regions_url: Option<&str>) -> bool {
    let (Some(state_select), Some(district_select)) = (
        page.element_by_id(STATE_SELECT_ID),
        page.element_by_id(DISTRICT_SELECT_ID),
    ) else {
        return false;
    };
    if !district_select.is_select() {
        log::debug!("#{DISTRICT_SELECT_ID} is not a select, leaving manual entry");
        return false;
    }

    let regions = Rc::new(RefCell::new(regions));

    if let Some(url) = regions_url {
        let fetch = page.fetch_json(url);
        let url = url.to_string();
        let target = regions.clone();
        page.spawn_local(Box::pin(async move {
            let loaded = match fetch.await {
                Ok(value) => RegionMap::from_value(value).map_err(|error| error.to_string()),
                Err(error) => Err(error.to_string()),
            };
            match loaded {
                Ok(map) => {
                    log::debug!("Loaded {} states from {url}", map.len());
                    *target.borrow_mut() = map;
                }
                Err(reason) => {
                    log::warn!("Keeping built-in region map, {url} unusable: {reason}");
                }
            }
        }));
    }

    let parent = state_select.clone();
    state_select.listen(
        EventKind::Change,
        Box::new(move |_: &dyn PageEvent| {
            let options = district_options(&regions.borrow(), &parent.value());
            district_select.replace_options(&options);
        }),
    );
    true
}
