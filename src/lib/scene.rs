//! The sphere list the fragment shader traces against.

use crate::{color::Color, config::SceneConfig, vector::Vec3, Building, Built};

use std::{fmt::Debug, marker::PhantomData};

#[derive(Debug, PartialEq, thiserror::Error)]
/// Reasons a [Scene] refuses to build.
pub enum Error {
    #[error("Sphere {index} has invalid radius {radius}, expected a finite positive value")]
    /// Radius is zero, negative or not finite.
    InvalidRadius {
        /// Position of the sphere in the scene list.
        index: usize,
        /// Offending radius.
        radius: f32,
    },
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
/// Surface properties of a [Sphere].
pub struct Material {
    /// Albedo.
    pub colour: Color,
    /// Light given off by the surface, black for none.
    pub emission: Color,
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[allow(missing_docs)]
/// A sphere primitive.
pub struct Sphere {
    pub position: Vec3,
    pub radius: f32,
    pub material: Material,
}

/// Ordered list of spheres.
///
/// A [Built] scene is what the renderer uploads and never changes underneath it. Editing goes
/// through [edit](Scene::<Built>::edit) and a fresh [build](Scene::<Building>::build).
pub struct Scene<State> {
    state: PhantomData<State>,
    spheres: Vec<Sphere>,
}

impl<State> Debug for Scene<State> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("spheres", &self.spheres.len())
            .finish()
    }
}

impl<State> Scene<State> {
    /// Spheres in upload order.
    pub fn spheres(&self) -> &[Sphere] {
        &self.spheres
    }

    /// Number of spheres.
    pub fn len(&self) -> usize {
        self.spheres.len()
    }

    /// Whether the scene holds no sphere at all.
    pub fn is_empty(&self) -> bool {
        self.spheres.is_empty()
    }
}

impl Default for Scene<Building> {
    fn default() -> Self {
        Self {
            state: PhantomData,
            spheres: vec![],
        }
    }
}

impl Scene<Building> {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a sphere at the end of the list.
    pub fn add_sphere(&mut self, sphere: Sphere) -> &mut Self {
        self.spheres.push(sphere);
        self
    }

    /// Lock the sphere list after checking every radius.
    pub fn build(self) -> Result<Scene<Built>, Error> {
        if let Some((index, sphere)) = self
            .spheres
            .iter()
            .enumerate()
            .find(|(_, sphere)| !(sphere.radius.is_finite() && sphere.radius > 0.))
        {
            return Err(Error::InvalidRadius {
                index,
                radius: sphere.radius,
            });
        }

        Ok(Scene {
            state: PhantomData,
            spheres: self.spheres,
        })
    }
}

impl Scene<Built> {
    /// Lay out `config.count` spheres along X with growing radii, cycling through the palette.
    pub fn arranged(config: &SceneConfig) -> Result<Self, Error> {
        let mut scene = Scene::<Building>::new();

        for i in 0..config.count {
            let step = i as f32;
            scene.add_sphere(Sphere {
                position: Vec3::new(config.start_x + step * config.spacing, 0., config.depth),
                radius: config.base_radius + step * config.radius_increment,
                material: Material {
                    colour: config
                        .palette
                        .iter()
                        .cycle()
                        .nth(i)
                        .copied()
                        .unwrap_or(Color::WHITE),
                    emission: Color::BLACK,
                },
            });
        }

        scene.build()
    }

    /// Reopen the scene for changes.
    pub fn edit(self) -> Scene<Building> {
        Scene {
            state: PhantomData,
            spheres: self.spheres,
        }
    }
}

#[cfg(test)]
mod test {
    use float_eq::assert_float_eq;

    use super::*;

    #[test]
    fn default_arrangement() {
        let scene = Scene::arranged(&SceneConfig::default()).unwrap();
        let spheres = scene.spheres();

        assert_eq!(3, spheres.len());

        let expected = [
            (-2., 0.3, Color::RED),
            (0., 0.5, Color::GREEN),
            (2., 0.7, Color::BLUE),
        ];
        for (sphere, (x, radius, colour)) in spheres.iter().zip(expected) {
            assert_float_eq!(x, sphere.position[0], abs <= 0.000_1);
            assert_eq!(0., sphere.position[1]);
            assert_eq!(-3., sphere.position[2]);
            assert_float_eq!(radius, sphere.radius, abs <= 0.000_1);
            assert_eq!(colour, sphere.material.colour);
            assert_eq!(Color::BLACK, sphere.material.emission);
        }
    }

    #[test]
    fn arrangement_is_deterministic() {
        let config = SceneConfig::default();

        let first = Scene::arranged(&config).unwrap();
        let second = Scene::arranged(&config).unwrap();

        assert_eq!(first.spheres(), second.spheres());
    }

    #[test]
    fn palette_cycles() {
        let config = SceneConfig {
            count: 5,
            palette: vec![Color::RED, Color::BLUE],
            ..Default::default()
        };
        let scene = Scene::arranged(&config).unwrap();

        let colours = scene
            .spheres()
            .iter()
            .map(|sphere| sphere.material.colour)
            .collect::<Vec<_>>();
        assert_eq!(
            vec![Color::RED, Color::BLUE, Color::RED, Color::BLUE, Color::RED],
            colours
        );
    }

    #[test]
    fn rejects_non_positive_radius() {
        let config = SceneConfig {
            base_radius: 0.1,
            radius_increment: -0.2,
            ..Default::default()
        };

        assert_eq!(
            Some(1),
            match Scene::arranged(&config) {
                Err(Error::InvalidRadius { index, .. }) => Some(index),
                Ok(_) => None,
            }
        );
    }

    #[test]
    fn edit_round_trip() {
        let scene = Scene::arranged(&SceneConfig::default()).unwrap();

        let mut editing = scene.edit();
        editing.add_sphere(Sphere {
            position: Vec3::new(0., -101., -3.),
            radius: 100.,
            material: Material {
                colour: Color::WHITE,
                emission: Color::BLACK,
            },
        });
        let scene = editing.build().unwrap();

        assert_eq!(4, scene.len());
        assert_eq!(100., scene.spheres()[3].radius);
    }
}
