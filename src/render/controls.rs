//! Custom player controls shared by the YouTube, SoundCloud, and native
//! renderers. A client-side controller binds to the `me-controls__*` classes.

pub const CONTROLS: &str = concat!(
    r#"<div class="me-controls" data-role="controls">"#,
    r#"<div class="me-controls__progress" data-role="progress">"#,
    r#"<div class="me-controls__buffered"></div>"#,
    r#"<div class="me-controls__played"></div>"#,
    r#"<div class="me-controls__handle" role="slider" aria-label="Seek" tabindex="0"></div>"#,
    "</div>",
    r#"<div class="me-controls__bar">"#,
    r#"<button type="button" class="me-controls__play" data-action="toggle-play" aria-label="Play"></button>"#,
    r#"<div class="me-controls__volume">"#,
    r#"<button type="button" class="me-controls__mute" data-action="toggle-mute" aria-label="Mute"></button>"#,
    r#"<input type="range" class="me-controls__volume-slider" min="0" max="1" step="0.05" value="1" aria-label="Volume">"#,
    "</div>",
    r#"<div class="me-controls__time"><span class="me-controls__elapsed">0:00</span> / <span class="me-controls__duration">0:00</span></div>"#,
    r#"<button type="button" class="me-controls__fullscreen" data-action="toggle-fullscreen" aria-label="Fullscreen"></button>"#,
    "</div>",
    "</div>",
);

/// The controls block, or nothing when the caller turned controls off.
pub fn controls(show: bool) -> &'static str {
    if show {
        CONTROLS
    } else {
        ""
    }
}
