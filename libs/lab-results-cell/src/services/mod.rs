pub mod results;

pub use results::LabResultsService;
