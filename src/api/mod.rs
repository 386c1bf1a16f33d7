pub mod leave_history;
