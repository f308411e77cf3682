pub mod web_search;
