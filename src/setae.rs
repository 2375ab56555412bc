//! Static layout of the toe-pad scene: the setae field and the molecule cloud.
//!
//! Both are generated once from a seeded RNG and never mutated afterwards;
//! only their rendered transforms change from frame to frame. Re-running the
//! generator with the same seed reproduces the same scene.

use glam::{Mat4, Quat, Vec3};
use ordered_float::OrderedFloat;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::constants::{
    COLLAPSED_SETA_LENGTH, LAMELLA_COUNT, LAMELLA_LENGTH, LAMELLA_WIDTH, MOLECULE_COUNT,
    SETAE_COUNT, SETAE_PER_LAMELLA_X, SETAE_PER_LAMELLA_Z,
};
use crate::numeric::{count_f32, lerp};
use crate::vector_math::lean_twist_rotation;

/// Extra reach past the end of a seta at which its tip is sampled.
const TIP_CLEARANCE: f32 = 0.02;

/// Position, orientation and scale of one rendered element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InstanceTransform {
    /// World-space translation.
    pub translation: Vec3,
    /// World-space rotation.
    pub rotation: Quat,
    /// Per-axis scale.
    pub scale: Vec3,
}

impl Default for InstanceTransform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl InstanceTransform {
    /// Affine matrix suitable for an instance buffer upload.
    #[must_use]
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

/// One hair of the setae field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SetaDescriptor {
    /// Anchor on the lamella surface.
    pub base: Vec3,
    /// Fully grown length.
    pub rest_length: f32,
    /// Lean about the X axis (radians).
    pub lean: f32,
    /// Twist about the Y axis (radians).
    pub twist: f32,
}

impl SetaDescriptor {
    /// Orientation derived from lean and twist.
    #[must_use]
    pub fn rotation(&self) -> Quat {
        lean_twist_rotation(self.lean, self.twist)
    }

    /// Unit vector from base towards tip.
    #[must_use]
    pub fn direction(&self) -> Vec3 {
        self.rotation() * Vec3::Y
    }

    /// Rendered length for a growth fraction in `[0, 1]`.
    #[must_use]
    pub fn length_at(&self, growth: f32) -> f32 {
        lerp(COLLAPSED_SETA_LENGTH, self.rest_length, growth)
    }

    /// Transform of a unit-height shaft grown to `growth`.
    ///
    /// The base stays anchored: the shaft centre sits half the current length
    /// along the lean direction.
    #[must_use]
    pub fn pose(&self, growth: f32) -> InstanceTransform {
        let length = self.length_at(growth);
        let rotation = self.rotation();
        let direction = rotation * Vec3::Y;
        InstanceTransform {
            translation: self.base + direction * (length / 2.0),
            rotation,
            scale: Vec3::new(1.0, length, 1.0),
        }
    }

    /// Tip position for a growth fraction.
    #[must_use]
    pub fn tip(&self, growth: f32) -> Vec3 {
        self.base + self.direction() * (self.length_at(growth) + TIP_CLEARANCE)
    }
}

/// The ordered setae brush covering every lamella.
#[derive(Debug, Clone, PartialEq)]
pub struct SetaField {
    setae: Vec<SetaDescriptor>,
}

impl SetaField {
    /// Lays out `LAMELLA_COUNT × SETAE_PER_LAMELLA_X × SETAE_PER_LAMELLA_Z`
    /// setae with jittered placement, length, lean and twist.
    pub fn generate(rng: &mut impl Rng) -> Self {
        let mut setae = Vec::with_capacity(SETAE_COUNT);
        let base_x_start = -LAMELLA_LENGTH / 2.0 + 4.0;
        let rows = count_f32(SETAE_PER_LAMELLA_X - 1);
        let cols = count_f32(SETAE_PER_LAMELLA_Z - 1);
        for lamella in 0..LAMELLA_COUNT {
            let lamella_z = lamella_centre_z(lamella);
            for row in 0..SETAE_PER_LAMELLA_X {
                let x = base_x_start + count_f32(row) / rows * (LAMELLA_LENGTH - 8.0);
                for col in 0..SETAE_PER_LAMELLA_Z {
                    let z = lamella_z
                        + (count_f32(col) / cols - 0.5) * (LAMELLA_WIDTH - 1.6)
                        + jitter(rng, 0.4);
                    let y = 1.15 + jitter(rng, 0.12);
                    let rest_length = rng.gen::<f32>().mul_add(8.4, 5.5);
                    let lean = 0.22 + jitter(rng, 0.05);
                    let twist = jitter(rng, 0.14);
                    setae.push(SetaDescriptor {
                        base: Vec3::new(x, y, z),
                        rest_length,
                        lean,
                        twist,
                    });
                }
            }
        }
        Self { setae }
    }

    /// Builds a field from explicit descriptors.
    #[must_use]
    pub const fn from_descriptors(setae: Vec<SetaDescriptor>) -> Self {
        Self { setae }
    }

    /// All descriptors in layout order.
    #[must_use]
    pub fn as_slice(&self) -> &[SetaDescriptor] {
        &self.setae
    }

    /// Number of setae.
    #[must_use]
    pub fn len(&self) -> usize {
        self.setae.len()
    }

    /// Whether the field is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.setae.is_empty()
    }

    /// Descriptor at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&SetaDescriptor> {
        self.setae.get(index)
    }

    /// Index of the centre-most seta, used for the magnified detail.
    #[must_use]
    pub fn focus_index(&self) -> usize {
        self.setae.len() / 2
    }

    /// Evenly spread sample of `count` indices for force links.
    #[must_use]
    pub fn link_indices(&self, count: usize) -> Vec<usize> {
        if count == 0 || self.setae.is_empty() {
            return Vec::new();
        }
        (0..count).map(|i| i * self.setae.len() / count).collect()
    }

    /// Writes the pose of every seta at `growth` into `out`.
    ///
    /// `out` is resized only when its length differs from the field.
    pub fn write_poses(&self, growth: f32, out: &mut Vec<InstanceTransform>) {
        out.resize(self.setae.len(), InstanceTransform::default());
        for (slot, seta) in out.iter_mut().zip(&self.setae) {
            *slot = seta.pose(growth);
        }
    }
}

/// Centre of lamella `index` along Z.
#[must_use]
pub fn lamella_centre_z(index: usize) -> f32 {
    (count_f32(index) - count_f32(LAMELLA_COUNT - 1) / 2.0) * (LAMELLA_WIDTH + 1.0)
}

/// Fixed point cloud hovering above the pad.
#[derive(Debug, Clone, PartialEq)]
pub struct MoleculeCloud {
    positions: Vec<Vec3>,
    scales: Vec<f32>,
}

impl MoleculeCloud {
    /// Scatters `count` molecules in a 34 × 7 × 34 box above the pad.
    pub fn generate(rng: &mut impl Rng, count: usize) -> Self {
        let mut positions = Vec::with_capacity(count);
        let mut scales = Vec::with_capacity(count);
        for _ in 0..count {
            let x = jitter(rng, 34.0);
            let z = jitter(rng, 34.0);
            let y = rng.gen::<f32>().mul_add(7.0, 14.0);
            positions.push(Vec3::new(x, y, z));
            scales.push(rng.gen::<f32>().mul_add(1.2, 0.6));
        }
        Self { positions, scales }
    }

    /// Builds a cloud from explicit positions with unit scale.
    #[must_use]
    pub fn from_positions(positions: Vec<Vec3>) -> Self {
        let scales = vec![1.0; positions.len()];
        Self { positions, scales }
    }

    /// Molecule centres.
    #[must_use]
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Uniform scale of each molecule.
    #[must_use]
    pub fn scales(&self) -> &[f32] {
        &self.scales
    }

    /// Closest molecule to `point` and its distance.
    #[must_use]
    pub fn nearest(&self, point: Vec3) -> Option<(Vec3, f32)> {
        self.positions
            .iter()
            .copied()
            .min_by_key(|candidate| OrderedFloat(candidate.distance_squared(point)))
            .map(|nearest| (nearest, nearest.distance(point)))
    }
}

/// Scene content fixed at start-up.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneLayout {
    /// The setae brush.
    pub field: SetaField,
    /// The molecule cloud.
    pub molecules: MoleculeCloud,
}

impl SceneLayout {
    /// Generates the field and cloud from a single seeded RNG.
    ///
    /// # Examples
    ///
    /// ```
    /// use gecko_lab::setae::SceneLayout;
    /// let a = SceneLayout::from_seed(7);
    /// let b = SceneLayout::from_seed(7);
    /// assert_eq!(a, b);
    /// assert_eq!(a.field.len(), 432);
    /// ```
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self::generate(seed, MOLECULE_COUNT)
    }

    /// Like [`Self::from_seed`] with an explicit molecule count.
    #[must_use]
    pub fn generate(seed: u64, molecule_count: usize) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let field = SetaField::generate(&mut rng);
        let molecules = MoleculeCloud::generate(&mut rng, molecule_count);
        Self { field, molecules }
    }
}

fn jitter(rng: &mut impl Rng, span: f32) -> f32 {
    (rng.gen::<f32>() - 0.5) * span
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::{fixture, rstest};

    #[fixture]
    fn layout() -> SceneLayout {
        SceneLayout::from_seed(42)
    }

    #[rstest]
    fn field_has_expected_size(layout: SceneLayout) {
        assert_eq!(layout.field.len(), SETAE_COUNT);
        assert_eq!(layout.molecules.positions().len(), MOLECULE_COUNT);
    }

    #[rstest]
    fn descriptors_stay_in_jitter_ranges(layout: SceneLayout) {
        for seta in layout.field.as_slice() {
            assert!((5.5..13.9).contains(&seta.rest_length));
            assert!((0.19..0.25).contains(&seta.lean));
            assert!(seta.twist.abs() <= 0.0701);
            assert!((1.08..1.22).contains(&seta.base.y));
        }
    }

    #[rstest]
    fn pose_keeps_base_anchored(layout: SceneLayout) {
        let seta = layout.field.as_slice().first().copied().unwrap_or_else(|| {
            panic!("field should not be empty");
        });
        for growth in [0.0, 0.4, 1.0] {
            let pose = seta.pose(growth);
            let length = seta.length_at(growth);
            let base = pose.translation - seta.direction() * (length / 2.0);
            assert_relative_eq!(base.x, seta.base.x, epsilon = 1e-4);
            assert_relative_eq!(base.y, seta.base.y, epsilon = 1e-4);
            assert_relative_eq!(base.z, seta.base.z, epsilon = 1e-4);
            assert_relative_eq!(pose.scale.y, length);
        }
    }

    #[test]
    fn collapsed_and_grown_lengths() {
        let seta = SetaDescriptor {
            base: Vec3::ZERO,
            rest_length: 10.0,
            lean: 0.0,
            twist: 0.0,
        };
        assert_relative_eq!(seta.length_at(0.0), COLLAPSED_SETA_LENGTH);
        assert_relative_eq!(seta.length_at(1.0), 10.0);
        assert_relative_eq!(seta.tip(1.0).y, 10.02, epsilon = 1e-5);
    }

    #[rstest]
    fn write_poses_reuses_buffer(layout: SceneLayout) {
        let mut buffer = Vec::with_capacity(SETAE_COUNT);
        layout.field.write_poses(0.5, &mut buffer);
        let capacity = buffer.capacity();
        layout.field.write_poses(0.7, &mut buffer);
        assert_eq!(buffer.len(), SETAE_COUNT);
        assert_eq!(buffer.capacity(), capacity);
    }

    #[test]
    fn nearest_picks_closest_molecule() {
        let cloud = MoleculeCloud::from_positions(vec![
            Vec3::new(0.0, 10.0, 0.0),
            Vec3::new(0.0, 3.0, 0.0),
            Vec3::new(5.0, 0.0, 0.0),
        ]);
        let (point, distance) = cloud
            .nearest(Vec3::ZERO)
            .unwrap_or_else(|| panic!("cloud should not be empty"));
        assert_eq!(point, Vec3::new(0.0, 3.0, 0.0));
        assert_relative_eq!(distance, 3.0);
    }

    #[test]
    fn empty_cloud_has_no_nearest() {
        assert!(MoleculeCloud::from_positions(Vec::new())
            .nearest(Vec3::ZERO)
            .is_none());
    }

    #[rstest]
    fn link_indices_are_spread(layout: SceneLayout) {
        let links = layout.field.link_indices(40);
        assert_eq!(links.len(), 40);
        assert_eq!(links.first(), Some(&0));
        assert!(links.windows(2).all(|w| matches!(w, [a, b] if a < b)));
        assert!(links.iter().all(|&i| i < SETAE_COUNT));
    }

    #[rstest]
    fn focus_is_centre_index(layout: SceneLayout) {
        assert_eq!(layout.field.focus_index(), SETAE_COUNT / 2);
    }

    #[test]
    fn lamellae_are_centred() {
        let first = lamella_centre_z(0);
        let last = lamella_centre_z(LAMELLA_COUNT - 1);
        assert_relative_eq!(first, -last);
    }
}
