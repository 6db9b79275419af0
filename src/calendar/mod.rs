pub mod persian;

pub use persian::{gregorian_to_persian, GregorianDate, PersianDate};
