pub mod crossing_log;
