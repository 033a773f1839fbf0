mod common;

mod reminder_sweep;
