mod recorder;

pub use recorder::AnalyticsRecorder;
