// Job-description analysis engine.
// Extraction feeds scoring, company intel and content generation; all of it is
// synchronous and free of I/O. Persistence lives in `history`.

pub mod company_intel;
pub mod content;
pub mod handlers;
pub mod pipeline;
pub mod scoring;
pub mod skills;
