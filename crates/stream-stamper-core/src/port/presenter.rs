use crate::{
    play::PlayData,
    session::{StreamSession, Timestamp},
};

/// Receives session change notifications from the recorder.
///
/// All methods are invoked synchronously from within recorder event
/// handlers, possibly on a background thread; implementations must be
/// fast or hand off to their own async mechanism. Arguments are
/// point-in-time snapshots.
pub trait RecordingPresenter: Send + Sync {
    /// The stream went live and recording began.
    fn stream_started(&self, session: &StreamSession<PlayData>);

    /// The stream ended and recording stopped.
    fn stream_ended(&self, session: &StreamSession<PlayData>);

    /// A new timestamp was appended.
    fn timestamp_added(&self, session: &StreamSession<PlayData>, timestamp: &Timestamp<PlayData>);

    /// An existing timestamp's payload was updated.
    fn timestamp_updated(&self, session: &StreamSession<PlayData>, timestamp: &Timestamp<PlayData>);
}
