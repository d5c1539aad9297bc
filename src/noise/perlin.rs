//! Seeded 3D Perlin noise
//!
//! Improved Perlin noise over Ken Perlin's reference permutation table. The
//! seed is folded into the lattice hash, so one table serves every seed.

use glam::Vec3;

// Ken Perlin's reference permutation. Changing it changes every planet.
const PERM: [u32; 256] = [
    151, 160, 137, 91, 90, 15, 131, 13, 201, 95, 96, 53, 194, 233, 7, 225, 140, 36, 103, 30, 69,
    142, 8, 99, 37, 240, 21, 10, 23, 190, 6, 148, 247, 120, 234, 75, 0, 26, 197, 62, 94, 252, 219,
    203, 117, 35, 11, 32, 57, 177, 33, 88, 237, 149, 56, 87, 174, 20, 125, 136, 171, 168, 68, 175,
    74, 165, 71, 134, 139, 48, 27, 166, 77, 146, 158, 231, 83, 111, 229, 122, 60, 211, 133, 230,
    220, 105, 92, 41, 55, 46, 245, 40, 244, 102, 143, 54, 65, 25, 63, 161, 1, 216, 80, 73, 209, 76,
    132, 187, 208, 89, 18, 169, 200, 196, 135, 130, 116, 188, 159, 86, 164, 100, 109, 198, 173,
    186, 3, 64, 52, 217, 226, 250, 124, 123, 5, 202, 38, 147, 118, 126, 255, 82, 85, 212, 207, 206,
    59, 227, 47, 16, 58, 17, 182, 189, 28, 42, 223, 183, 170, 213, 119, 248, 152, 2, 44, 154, 163,
    70, 221, 153, 101, 155, 167, 43, 172, 9, 129, 22, 39, 253, 19, 98, 108, 110, 79, 113, 224, 232,
    178, 185, 112, 104, 218, 246, 97, 228, 251, 34, 242, 193, 238, 210, 144, 12, 191, 179, 162,
    241, 81, 51, 145, 235, 249, 14, 239, 107, 49, 192, 214, 31, 181, 199, 106, 157, 184, 84, 204,
    176, 115, 121, 50, 45, 127, 4, 150, 254, 138, 236, 205, 93, 222, 114, 67, 29, 24, 72, 243, 141,
    128, 195, 78, 66, 215, 61, 156, 180,
];

/// Lattice hash for one cube corner, salted with the seed
#[inline]
fn corner_hash(corner: [i32; 3], seed: u32) -> u32 {
    let salt = seed.wrapping_mul(0x9E37_79B9) ^ (seed >> 16);
    let ix = ((corner[0] as u32) ^ salt) & 255;
    let iy = ((corner[1] as u32) ^ (salt >> 8)) & 255;
    let iz = ((corner[2] as u32) ^ (salt >> 16)) & 255;
    let a = PERM[ix as usize];
    let b = PERM[((a + iy) & 255) as usize];
    PERM[((b + iz) & 255) as usize]
}

/// Dot product of `offset` with one of the 12 cube-edge gradients picked by `hash`
#[inline]
fn corner_gradient(hash: u32, offset: Vec3) -> f32 {
    let h = hash & 15;

    let u = if h < 8 { offset.x } else { offset.y };
    let v = if h < 4 {
        offset.y
    } else if h == 12 || h == 14 {
        offset.z
    } else {
        offset.x
    };

    let u = if (h & 1) == 0 { -u } else { u };
    let v = if (h & 2) == 0 { -v } else { v };

    u + v
}

/// Quintic fade curve `6t^5 - 15t^4 + 10t^3`
#[inline]
fn fade(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + t * (b - a)
}

/// Sample raw 3D Perlin noise, roughly in `[-1, 1]`
///
/// Pure in `(position, seed)`: there is no table state beyond the constant
/// permutation, so the same inputs always return the same bits.
pub fn perlin_3d(position: Vec3, seed: u32) -> f32 {
    let cell = position.floor();
    let local = position - cell;
    let (x0, y0, z0) = (cell.x as i32, cell.y as i32, cell.z as i32);

    let fade_x = fade(local.x);
    let fade_y = fade(local.y);
    let fade_z = fade(local.z);

    // Corners in (dx, dy, dz) order; the offset is measured from each corner.
    let contribution = |dx: i32, dy: i32, dz: i32| {
        let hash = corner_hash([x0 + dx, y0 + dy, z0 + dz], seed);
        corner_gradient(hash, local - Vec3::new(dx as f32, dy as f32, dz as f32))
    };

    let x00 = lerp(contribution(0, 0, 0), contribution(1, 0, 0), fade_x);
    let x10 = lerp(contribution(0, 1, 0), contribution(1, 1, 0), fade_x);
    let x01 = lerp(contribution(0, 0, 1), contribution(1, 0, 1), fade_x);
    let x11 = lerp(contribution(0, 1, 1), contribution(1, 1, 1), fade_x);

    lerp(lerp(x00, x10, fade_y), lerp(x01, x11, fade_y), fade_z)
}

/// Perlin noise remapped from `[-1, 1]` to `[0, 1]`
#[inline]
pub fn perlin_3d_unit(position: Vec3, seed: u32) -> f32 {
    (perlin_3d(position, seed) + 1.0) * 0.5
}
