//! World-space → screen-space projection centred on a reference body

use crate::error::{SimError, SimResult};
use crate::simulation::states::{NVec2, System};

/// Meters per pixel
pub const DEFAULT_SCALE: f64 = 2e6;

#[derive(Debug, Clone)]
pub struct Viewport {
    reference: String, // body at the centre of the view
    scale: f64, // meters per pixel
    center: NVec2, // screen position of the reference body
}

impl Viewport {
    pub fn new(reference: impl Into<String>, scale: f64, center: NVec2) -> SimResult<Self> {
        if !(scale.is_finite() && scale > 0.0) {
            return Err(SimError::InvalidScale(scale));
        }
        Ok(Self {
            reference: reference.into(),
            scale,
            center,
        })
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn center(&self) -> NVec2 {
        self.center
    }

    /// Re-centre the view, e.g. after the window was resized
    pub fn set_center(&mut self, center: NVec2) {
        self.center = center;
    }

    /// Project one world position. Fails if the reference body is missing.
    pub fn to_screen(&self, sys: &System, p: NVec2) -> SimResult<NVec2> {
        let origin = sys.get(&self.reference)?.position();
        Ok((p - origin) / self.scale + self.center)
    }

    /// Project many positions against the same reference position
    pub fn to_screen_all<I>(&self, sys: &System, points: I) -> SimResult<Vec<NVec2>>
    where
        I: IntoIterator<Item = NVec2>,
    {
        let origin = sys.get(&self.reference)?.position();
        Ok(points
            .into_iter()
            .map(|p| (p - origin) / self.scale + self.center)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::states::Body;

    fn sys() -> System {
        System::new(vec![Body::new(NVec2::new(4e6, -2e6), NVec2::zeros(), 1.0, 0.0, "Earth").unwrap()]).unwrap()
    }

    #[test]
    fn reference_body_lands_on_center() {
        let viewport = Viewport::new("Earth", DEFAULT_SCALE, NVec2::new(400.0, 300.0)).unwrap();
        let s = viewport.to_screen(&sys(), NVec2::new(4e6, -2e6)).unwrap();
        assert_eq!(s, NVec2::new(400.0, 300.0));

        let s = viewport.to_screen(&sys(), NVec2::new(6e6, -2e6)).unwrap();
        assert_eq!(s, NVec2::new(401.0, 300.0));
    }

    #[test]
    fn missing_reference_propagates() {
        let viewport = Viewport::new("Sun", DEFAULT_SCALE, NVec2::zeros()).unwrap();
        let err = viewport.to_screen(&sys(), NVec2::zeros()).unwrap_err();
        assert_eq!(err, SimError::NotFound { name: "Sun".into() });
        assert!(viewport.to_screen_all(&sys(), vec![NVec2::zeros()]).is_err());
    }

    #[test]
    fn rejects_bad_scale() {
        assert!(Viewport::new("Earth", 0.0, NVec2::zeros()).is_err());
        assert!(Viewport::new("Earth", f64::NAN, NVec2::zeros()).is_err());
    }
}
