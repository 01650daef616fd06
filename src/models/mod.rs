pub mod interval;
pub mod review_record;
pub mod score;

pub use review_record::ReviewRecord;
pub use score::Score;
