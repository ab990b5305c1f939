pub mod sink;
pub mod snapshot;
pub mod thumbnails;
pub mod types;

use anyhow::Result;

use crate::error::DispatchError;
use self::types::{Item, ItemId};

/// Where tagged items and their thumbnails come from.
pub trait ItemSource {
    /// Items matching `query`. An empty query returns everything.
    fn fetch(&self, query: &[String]) -> Result<Vec<Item>>;

    /// Encoded image bytes of the item's thumbnail.
    fn fetch_thumbnail(&self, id: ItemId) -> Result<Vec<u8>>;
}

/// Receives the item ids of a clicked cluster.
pub trait DispatchSink {
    fn send(&mut self, destination: &str, item_ids: &[ItemId]) -> Result<(), DispatchError>;
}

impl<S: DispatchSink + ?Sized> DispatchSink for Box<S> {
    fn send(&mut self, destination: &str, item_ids: &[ItemId]) -> Result<(), DispatchError> {
        (**self).send(destination, item_ids)
    }
}
