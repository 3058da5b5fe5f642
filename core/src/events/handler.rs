use super::GameSignal;

/// Receives the signals produced by one snapshot cycle.
///
/// The notification center is the main consumer; extra handlers (recorders,
/// counters in the replay tool) can be registered on a
/// [`GameSession`](crate::context::GameSession).
pub trait SignalHandler {
    fn handle_signal(&mut self, signal: &GameSignal);

    fn handle_signals(&mut self, signals: &[GameSignal]) {
        for signal in signals {
            self.handle_signal(signal);
        }
    }
}
