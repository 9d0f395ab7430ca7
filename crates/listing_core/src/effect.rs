use crate::page::Epoch;
use crate::request::RequestDescriptor;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Issue one page request; the response must come back tagged with `epoch` and `page`.
    FetchPage {
        epoch: Epoch,
        page: u32,
        request: RequestDescriptor,
    },
}
