pub mod holiday;
pub mod leave_record;
pub mod leave_type;
