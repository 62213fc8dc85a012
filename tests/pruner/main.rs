#![allow(clippy::cast_precision_loss)]

mod reporter;
