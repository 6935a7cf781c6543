pub mod charts;
pub mod detalle_toggle;
mod icons;
pub mod movements_table;
pub mod split_form;
pub mod stat_card;
