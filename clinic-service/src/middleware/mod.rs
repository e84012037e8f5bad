pub mod staff;

pub use staff::{StaffId, STAFF_HEADER};
