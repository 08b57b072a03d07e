/// What the frame loop does after `get_current_texture` fails.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// The surface was configured again; the next frame should succeed.
    Reconfigured,
    SkipFrame,
    /// Out of memory. The runtime closes the window.
    Fatal,
}

pub(crate) fn choose_surface_format(
    formats: &[wgpu::TextureFormat],
    prefer_srgb: bool,
) -> Option<wgpu::TextureFormat> {
    let first = *formats.first()?;

    let wanted = formats.iter().copied().find(|f| f.is_srgb() == prefer_srgb);
    Some(wanted.unwrap_or(first))
}

pub(crate) fn choose_alpha_mode(
    modes: &[wgpu::CompositeAlphaMode],
    requested: Option<wgpu::CompositeAlphaMode>,
) -> wgpu::CompositeAlphaMode {
    requested
        .filter(|m| modes.contains(m))
        .or_else(|| modes.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}

/// Maps a `SurfaceError` to the action the frame loop should take.
///
/// `Reconfigured` means the caller must reconfigure the surface.
pub(crate) fn surface_error_action(err: &wgpu::SurfaceError) -> SurfaceErrorAction {
    match err {
        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => SurfaceErrorAction::Reconfigured,
        wgpu::SurfaceError::OutOfMemory => SurfaceErrorAction::Fatal,
        wgpu::SurfaceError::Timeout => SurfaceErrorAction::SkipFrame,
        wgpu::SurfaceError::Other => SurfaceErrorAction::SkipFrame,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::{CompositeAlphaMode as Alpha, TextureFormat as Fmt};

    // ── format ────────────────────────────────────────────────────────────

    #[test]
    fn no_formats_means_no_choice() {
        assert_eq!(choose_surface_format(&[], true), None);
    }

    #[test]
    fn srgb_preferred_when_requested() {
        let formats = [Fmt::Bgra8Unorm, Fmt::Bgra8UnormSrgb];
        assert_eq!(choose_surface_format(&formats, true), Some(Fmt::Bgra8UnormSrgb));
    }

    #[test]
    fn linear_preferred_when_srgb_not_requested() {
        let formats = [Fmt::Bgra8UnormSrgb, Fmt::Bgra8Unorm];
        assert_eq!(choose_surface_format(&formats, false), Some(Fmt::Bgra8Unorm));
    }

    #[test]
    fn falls_back_to_first_format() {
        let formats = [Fmt::Rgba16Float];
        assert_eq!(choose_surface_format(&formats, true), Some(Fmt::Rgba16Float));
    }

    // ── alpha ─────────────────────────────────────────────────────────────

    #[test]
    fn requested_alpha_mode_used_if_supported() {
        let modes = [Alpha::Opaque, Alpha::PreMultiplied];
        assert_eq!(choose_alpha_mode(&modes, Some(Alpha::PreMultiplied)), Alpha::PreMultiplied);
    }

    #[test]
    fn unsupported_alpha_mode_falls_back_to_first() {
        let modes = [Alpha::Opaque];
        assert_eq!(choose_alpha_mode(&modes, Some(Alpha::PostMultiplied)), Alpha::Opaque);
        assert_eq!(choose_alpha_mode(&[], None), Alpha::Auto);
    }

    // ── errors ────────────────────────────────────────────────────────────

    #[test]
    fn surface_errors_map_to_actions() {
        use wgpu::SurfaceError as E;
        assert_eq!(surface_error_action(&E::Lost), SurfaceErrorAction::Reconfigured);
        assert_eq!(surface_error_action(&E::Outdated), SurfaceErrorAction::Reconfigured);
        assert_eq!(surface_error_action(&E::Timeout), SurfaceErrorAction::SkipFrame);
        assert_eq!(surface_error_action(&E::OutOfMemory), SurfaceErrorAction::Fatal);
    }
}
