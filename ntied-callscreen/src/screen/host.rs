use crate::call::AudioSource;
use crate::presentation::CallPresentation;

/// Window and navigation side of the call screen.
///
/// All methods are invoked from the screen's single event loop.
pub trait CallScreenHost: Send + Sync {
    fn render(&self, presentation: &CallPresentation);

    /// Remove the call screen. Called at most once per screen.
    fn dismiss(&self);

    /// Opacity of the status label, driven by the reconnecting blink.
    fn set_status_alpha(&self, _alpha: f32) {}

    /// Immediate feedback for a speakerphone toggle, before the route switch
    /// is confirmed by the audio service.
    fn show_audio_route_feedback(&self, _speaker_selected: bool) {}

    fn show_audio_picker(&self, _sources: &[AudioSource]) {}

    fn attach_video_surfaces(&self) {}

    fn detach_video_surfaces(&self) {}
}
