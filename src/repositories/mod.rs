pub mod history;

pub use history::{
    DispatchRecord, HistoryRepository, MongoHistoryRepository, SummaryRecord, TodoRef,
};
