/// Common trait for per-sample audio processors
///
/// Implemented by the multimode filter and the processors built from it.
pub trait Filter {
    /// Process a single sample through the filter
    fn process(&mut self, sample: f32) -> f32;

    /// Process a buffer of samples in-place
    fn process_buffer(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }

    /// Clear internal history, keeping the configuration
    fn reset(&mut self);
}
