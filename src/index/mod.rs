pub mod field_index;
