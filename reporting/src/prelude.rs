pub use crate::{charts::*, report::*, tabular::*, utils::errors::*};
