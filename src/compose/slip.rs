//! Order slip (会計伝票) for the cashier and the floor.

use super::{Variant, sections};
use crate::document::ComposedDocument;
use crate::error::Result;
use crate::layout::Layout;
use crate::model::Order;

pub fn compose(order: &Order, layout: &Layout) -> Result<ComposedDocument> {
    sections::compose(Variant::OrderSlip, order, layout)
}
