//! Shared container body of the sorting bin
//!
//! The shell flares outward toward the top, sits on four rounded corner
//! sectors and four short feet, and carries decorative grooves and a rim lip.

use crate::gfx::{
    geometry::MeshBuilder,
    resources::material::{brighten, scale_rgb, Material, Rgb},
};

use super::RIM_HEIGHT;

/// Radius of the rounded bottom corners, independent of bin scale
pub const CORNER_RADIUS: f32 = 0.5;
/// Outward scale of the top ring relative to the bottom ring
pub const FLARE: f32 = 1.05;
/// Extra outward scale of the rim beyond the flared top
pub const RIM_FLARE: f32 = 1.02;

const CORNER_SLICES: u32 = 12;
const GROOVE_COUNT: u32 = 4;
const FOOT_RADIUS: f32 = 0.4;
const FOOT_HEIGHT: f32 = 0.2;
const FOOT_SEGMENTS: u32 = 8;
const FOOT_INSET: f32 = 0.85;
const FOOT_COLOR: Rgb = [0.3, 0.3, 0.3];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    FrontLeft,
    FrontRight,
    BackRight,
    BackLeft,
}

/// One rounded bottom corner: a quarter-disk yawed into place
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CornerDisk {
    pub corner: Corner,
    pub position: [f32; 3],
    /// Rotation about +Y applied to the sector, degrees
    pub yaw_deg: f32,
    pub start_deg: f32,
    pub sweep_deg: f32,
}

impl CornerDisk {
    /// Horizontal (x, z) direction the sector reaches toward
    pub fn outward(&self) -> [f32; 2] {
        let yaw = self.yaw_deg.to_radians();
        [yaw.cos(), -yaw.sin()]
    }
}

/// Corner sectors for a body with the given half extents
///
/// Each sector's yaw is a distinct multiple of 90 degrees, so together they
/// cover the full circle once.
pub fn corner_disks(half_width: f32, half_height: f32, half_depth: f32) -> [CornerDisk; 4] {
    let y = -half_height + CORNER_RADIUS;
    let disk = |corner, x, z, yaw_deg| CornerDisk {
        corner,
        position: [x, y, z],
        yaw_deg,
        start_deg: 0.0,
        sweep_deg: 90.0,
    };
    [
        disk(Corner::FrontLeft, -half_width, half_depth, 180.0),
        disk(Corner::FrontRight, half_width, half_depth, 270.0),
        disk(Corner::BackRight, half_width, -half_depth, 0.0),
        disk(Corner::BackLeft, -half_width, -half_depth, 90.0),
    ]
}

/// Materials derived from one base color
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyPalette {
    pub shell: Material,
    pub corner: Material,
    pub groove: Material,
    pub rim: Material,
    pub foot: Material,
}

pub fn body_palette(base_color: Rgb) -> BodyPalette {
    let bright = brighten(base_color, 1.5);
    let shell = Material::shaded(bright)
        .with_specular(0.4)
        .with_shininess(20.0);
    BodyPalette {
        shell,
        corner: shell.with_diffuse(scale_rgb(bright, 0.9)),
        groove: shell.with_diffuse(scale_rgb(bright, 0.7)),
        rim: shell.with_diffuse(scale_rgb(bright, 0.8)),
        foot: shell.with_ambient(FOOT_COLOR).with_diffuse(FOOT_COLOR),
    }
}

/// Heights of the decorative grooves relative to the body center
pub fn groove_heights(height: f32) -> impl Iterator<Item = f32> {
    let h = height / 2.0;
    (1..=GROOVE_COUNT).map(move |i| -h + height * 0.2 * i as f32)
}

/// Centers of the four feet, relative to the body center
pub fn foot_positions(width: f32, height: f32, depth: f32) -> [[f32; 3]; 4] {
    let (w, h, d) = (width / 2.0 * FOOT_INSET, height / 2.0, depth / 2.0 * FOOT_INSET);
    [[-w, -h, -d], [w, -h, -d], [w, -h, d], [-w, -h, d]]
}

/// Builds the container shell, corners, grooves, rim and feet centered on the local origin
pub fn build_bin_body(b: &mut MeshBuilder, width: f32, height: f32, depth: f32, base_color: Rgb) {
    let palette = body_palette(base_color);
    let (w, h, d) = (width / 2.0, height / 2.0, depth / 2.0);

    b.with_material(palette.shell, |b| {
        shell(b, w, h, d);

        b.with_material(palette.corner, |b| {
            for disk in corner_disks(w, h, d) {
                b.with_transform(|b| {
                    let [x, y, z] = disk.position;
                    b.translate(x, y, z);
                    b.rotate(disk.yaw_deg, 0.0, 1.0, 0.0);
                    b.partial_disk(CORNER_RADIUS, CORNER_SLICES, disk.start_deg, disk.sweep_deg);
                });
            }
        });

        b.with_material(palette.groove, |b| grooves(b, height, w, d));
        b.with_material(palette.rim, |b| rim(b, w, h, d));
    });

    b.with_material(palette.foot, |b| {
        for [x, y, z] in foot_positions(width, height, depth) {
            b.with_transform(|b| {
                b.translate(x, y, z);
                b.cylinder(FOOT_RADIUS, FOOT_HEIGHT, FOOT_SEGMENTS);
            });
        }
    });
}

fn shell(b: &mut MeshBuilder, w: f32, h: f32, d: f32) {
    let bottom = -h + CORNER_RADIUS;
    let top = h - CORNER_RADIUS;
    let (tw, td) = (w * FLARE, d * FLARE);

    // Front
    b.quad(
        [-w, bottom, d],
        [w, bottom, d],
        [tw, top, td],
        [-tw, top, td],
        [0.0, 0.0, 1.0],
    );
    // Back
    b.quad(
        [-w, bottom, -d],
        [-tw, top, -td],
        [tw, top, -td],
        [w, bottom, -d],
        [0.0, 0.0, -1.0],
    );
    // Left
    b.quad(
        [-w, bottom, -d],
        [-w, bottom, d],
        [-tw, top, td],
        [-tw, top, -td],
        [-1.0, 0.0, 0.0],
    );
    // Right
    b.quad(
        [w, bottom, -d],
        [tw, top, -td],
        [tw, top, td],
        [w, bottom, d],
        [1.0, 0.0, 0.0],
    );
    // Bottom
    b.quad(
        [-w, bottom, -d],
        [w, bottom, -d],
        [w, bottom, d],
        [-w, bottom, d],
        [0.0, -1.0, 0.0],
    );
}

fn grooves(b: &mut MeshBuilder, height: f32, w: f32, d: f32) {
    for y in groove_heights(height) {
        b.line([-w * 0.95, y, d * 1.01], [w * 0.95, y, d * 1.01], [0.0, 0.0, 1.0]);
        b.line([-w * 1.01, y, -d * 0.9], [-w * 1.01, y, d * 0.9], [-1.0, 0.0, 0.0]);
        b.line([w * 1.01, y, -d * 0.9], [w * 1.01, y, d * 0.9], [1.0, 0.0, 0.0]);
    }
}

fn rim(b: &mut MeshBuilder, w: f32, h: f32, d: f32) {
    let rw = w * FLARE * RIM_FLARE;
    let rd = d * FLARE * RIM_FLARE;
    let lower = h - RIM_HEIGHT;
    let edge = |x: f32, z: f32| ([x, h, z], [x, lower, z]);

    // Back-left, front-left, front-right, back-right, and closed again
    b.quad_strip(&[
        edge(-rw, -rd),
        edge(-rw, rd),
        edge(rw, rd),
        edge(rw, -rd),
        edge(-rw, -rd),
    ]);
}
