//! Pages: the driver seam and the extractor built on top of it.

mod browser_page;
mod cdp_driver;
mod driver;
#[cfg(test)]
pub(crate) mod fake;

pub use browser_page::BrowserPage;
pub use cdp_driver::CdpDriver;
pub use driver::{BindingCallback, ElementHandle, PageDriver};
pub use crate::extract::AttributeValues;
