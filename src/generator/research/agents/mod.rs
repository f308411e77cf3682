pub mod research_analyst;
