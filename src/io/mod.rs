pub mod excel_read;
