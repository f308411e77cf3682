pub mod content_writer;
