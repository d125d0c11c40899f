//! Projection between spherical coordinates and IJK coordinates on the
//! icosahedron faces.
//!
//! Cell boundaries are produced on a substrate grid three times finer than
//! the cell's own resolution so that vertices land on lattice points.

use crate::constants::{
  EPSILON, INV_RES0_U_GNOMONIC, MAX_RES, AP7_ROT_RADS, NUM_HEX_VERTS, NUM_ICOSA_FACES, NUM_PENT_VERTS,
  RES0_U_GNOMONIC, RSQRT7, SIN60, SQRT7,
};
use crate::coords::ijk::{
  down_ap3, down_ap3r, down_ap7r, hex2d_to_coord_ijk, ijk_add, ijk_normalize, ijk_rotate60_ccw, ijk_rotate60_cw,
  ijk_scale, ijk_sub, ijk_to_hex2d, set_ijk,
};
use crate::index::is_resolution_class_iii;
use crate::latlng::{geo_az_distance_rads, geo_azimuth_rads, pos_angle_rads};
use crate::math::vec2d::{v2d_almost_equals, v2d_intersect, v2d_mag};
use crate::math::vec3d::{geo_to_vec3d, point_square_dist};
use crate::types::{CellBoundary, CoordIJK, FaceIJK, LatLng, Vec2d, Vec3d};
use crate::MAX_CELL_BNDRY_VERTS;

/// Face neighbor table index for the IJ quadrant.
pub(crate) const IJ_QUADRANT: usize = 1;
/// Face neighbor table index for the KI quadrant.
pub(crate) const KI_QUADRANT: usize = 2;
/// Face neighbor table index for the JK quadrant.
pub(crate) const JK_QUADRANT: usize = 3;

pub(crate) const INVALID_FACE: i32 = -1;

/// Maximum single-component dimension of the lattice at each Class II
/// resolution. Class III resolutions use the next finer Class II entry.
#[rustfmt::skip]
static MAX_DIM_BY_CII_RES: [i32; (MAX_RES + 2) as usize] = [
  2,          // res 0
  -1,         // res 1
  14,         // res 2
  -1,         // res 3
  98,         // res 4
  -1,         // res 5
  686,        // res 6
  -1,         // res 7
  4802,       // res 8
  -1,         // res 9
  33614,      // res 10
  -1,         // res 11
  235_298,    // res 12
  -1,         // res 13
  1_647_086,  // res 14
  -1,         // res 15
  11_529_602, // res 16
];

/// Lattice unit scale per Class II resolution, powers of 7.
#[rustfmt::skip]
static UNIT_SCALE_BY_CII_RES: [i32; (MAX_RES + 2) as usize] = [
  1,         // res 0
  -1,        // res 1
  7,         // res 2
  -1,        // res 3
  49,        // res 4
  -1,        // res 5
  343,       // res 6
  -1,        // res 7
  2401,      // res 8
  -1,        // res 9
  16807,     // res 10
  -1,        // res 11
  117_649,   // res 12
  -1,        // res 13
  823_543,   // res 14
  -1,        // res 15
  5_764_801, // res 16
];

/// Icosahedron face centers in spherical radians.
#[rustfmt::skip]
pub(crate) static FACE_CENTER_GEO: [LatLng; NUM_ICOSA_FACES as usize] = [
  LatLng { lat: 0.803_582_649_718_989_94, lng: 1.248_397_419_617_396 },     // face 0
  LatLng { lat: 1.307_747_883_455_638_2, lng: 2.536_945_009_877_921 },      // face 1
  LatLng { lat: 1.054_751_253_523_952, lng: -1.347_517_358_900_396_6 },     // face 2
  LatLng { lat: 0.600_191_595_538_186_8, lng: -0.450_603_909_469_755_75 },  // face 3
  LatLng { lat: 0.491_715_428_198_773_87, lng: 0.401_988_202_911_306_94 },  // face 4
  LatLng { lat: 0.172_745_327_415_618_7, lng: 1.678_146_885_280_433_7 },    // face 5
  LatLng { lat: 0.605_929_321_571_350_7, lng: 2.953_923_329_812_411_6 },    // face 6
  LatLng { lat: 0.427_370_518_328_979_64, lng: -1.888_876_200_336_285_4 },  // face 7
  LatLng { lat: -0.079_066_118_549_212_83, lng: -0.733_429_513_380_867_74 },// face 8
  LatLng { lat: -0.230_961_644_455_383_64, lng: 0.506_495_587_332_349 },    // face 9
  LatLng { lat: 0.079_066_118_549_212_83, lng: 2.408_163_140_208_925_5 },   // face 10
  LatLng { lat: 0.230_961_644_455_383_64, lng: -2.635_097_066_257_444 },    // face 11
  LatLng { lat: -0.172_745_327_415_618_7, lng: -1.463_445_768_309_359_5 },  // face 12
  LatLng { lat: -0.605_929_321_571_350_7, lng: -0.187_669_323_777_381_62 }, // face 13
  LatLng { lat: -0.427_370_518_328_979_64, lng: 1.252_716_453_253_508 },    // face 14
  LatLng { lat: -0.600_191_595_538_186_8, lng: 2.690_988_744_120_037_5 },   // face 15
  LatLng { lat: -0.491_715_428_198_773_87, lng: -2.739_604_450_678_486_3 }, // face 16
  LatLng { lat: -0.803_582_649_718_989_94, lng: -1.893_195_233_972_397 },   // face 17
  LatLng { lat: -1.307_747_883_455_638_2, lng: -0.604_647_643_711_872_1 },  // face 18
  LatLng { lat: -1.054_751_253_523_952, lng: 1.794_075_294_689_396_6 },     // face 19
];

/// Icosahedron face centers as unit-sphere Cartesian points.
#[rustfmt::skip]
static FACE_CENTER_POINT: [Vec3d; NUM_ICOSA_FACES as usize] = [
  Vec3d { x: 0.219_930_779_140_460_6, y: 0.658_369_178_027_499_6, z: 0.719_847_537_892_618_2 },    // face 0
  Vec3d { x: -0.213_923_483_450_142_1, y: 0.147_817_182_955_070_3, z: 0.965_601_793_521_420_5 },   // face 1
  Vec3d { x: 0.109_262_527_878_479_7, y: -0.481_195_157_287_321, z: 0.869_777_512_128_725_3 },     // face 2
  Vec3d { x: 0.742_856_730_158_679_1, y: -0.359_394_167_827_802_8, z: 0.564_800_593_651_703_3 },   // face 3
  Vec3d { x: 0.811_253_470_914_096_9, y: 0.344_895_323_763_938_4, z: 0.472_138_773_641_393 },      // face 4
  Vec3d { x: -0.105_549_814_961_392_1, y: 0.979_445_729_641_141_3, z: 0.171_887_461_000_936_5 },   // face 5
  Vec3d { x: -0.807_540_757_997_009_2, y: 0.153_355_248_589_881_8, z: 0.569_526_199_488_268_8 },   // face 6
  Vec3d { x: -0.284_614_806_978_790_7, y: -0.864_408_097_265_420_6, z: 0.414_479_255_247_354 },    // face 7
  Vec3d { x: 0.740_562_147_385_448_2, y: -0.667_329_956_456_552_4, z: -0.078_983_764_632_673_77 }, // face 8
  Vec3d { x: 0.851_230_398_647_429_3, y: 0.472_234_378_858_268_1, z: -0.228_913_738_868_780_8 },   // face 9
  Vec3d { x: -0.740_562_147_385_448_1, y: 0.667_329_956_456_552_4, z: 0.078_983_764_632_673_77 },  // face 10
  Vec3d { x: -0.851_230_398_647_429_2, y: -0.472_234_378_858_268_2, z: 0.228_913_738_868_780_8 },  // face 11
  Vec3d { x: 0.105_549_814_961_391_9, y: -0.979_445_729_641_141_3, z: -0.171_887_461_000_936_5 },  // face 12
  Vec3d { x: 0.807_540_757_997_009_2, y: -0.153_355_248_589_881_9, z: -0.569_526_199_488_268_8 },  // face 13
  Vec3d { x: 0.284_614_806_978_790_8, y: 0.864_408_097_265_420_4, z: -0.414_479_255_247_354 },     // face 14
  Vec3d { x: -0.742_856_730_158_679_1, y: 0.359_394_167_827_802_7, z: -0.564_800_593_651_703_3 },  // face 15
  Vec3d { x: -0.811_253_470_914_097_1, y: -0.344_895_323_763_938_2, z: -0.472_138_773_641_393 },   // face 16
  Vec3d { x: -0.219_930_779_140_460_7, y: -0.658_369_178_027_499_6, z: -0.719_847_537_892_618_2 }, // face 17
  Vec3d { x: 0.213_923_483_450_142, y: -0.147_817_182_955_070_4, z: -0.965_601_793_521_420_5 },    // face 18
  Vec3d { x: -0.109_262_527_878_479_6, y: 0.481_195_157_287_321, z: -0.869_777_512_128_725_3 },    // face 19
];

/// Azimuth in radians from each face center to its vertices 0, 1 and 2,
/// defining the Class II i, j and k axes.
#[rustfmt::skip]
static FACE_AXES_AZ_RADS_CII: [[f64; 3]; NUM_ICOSA_FACES as usize] = [
  [5.619_958_268_523_94, 3.525_563_166_130_744_5, 1.431_168_063_737_548_7],   // face 0
  [5.760_339_081_714_187, 3.665_943_979_320_991_7, 1.571_548_876_927_796],    // face 1
  [0.780_213_654_393_430_1, 4.969_003_859_179_821, 2.874_608_756_786_625_7],  // face 2
  [0.430_469_363_979_999_9, 4.619_259_568_766_391, 2.524_864_466_373_195_5],  // face 3
  [6.130_269_123_335_111, 4.035_874_020_941_916, 1.941_478_918_548_720_3],    // face 4
  [2.692_877_706_530_643, 0.598_482_604_137_447_1, 4.787_272_808_923_838],    // face 5
  [2.982_963_003_477_244, 0.888_567_901_084_048_4, 5.077_358_105_870_44],     // face 6
  [3.532_912_002_790_141, 1.438_516_900_396_945_7, 5.627_307_105_183_337],    // face 7
  [3.494_305_004_259_568, 1.399_909_901_866_372_9, 5.588_700_106_652_764],    // face 8
  [3.003_214_169_499_538_4, 0.908_819_067_106_342_9, 5.097_609_271_892_734],  // face 9
  [5.930_472_956_509_811_6, 3.836_077_854_116_616, 1.741_682_751_723_420_4],  // face 10
  [0.138_378_484_090_254_85, 4.327_168_688_876_646, 2.232_773_586_483_45],    // face 11
  [0.448_714_947_059_150_36, 4.637_505_151_845_541_5, 2.543_110_049_452_346], // face 12
  [0.158_629_650_112_549_36, 4.347_419_854_898_94, 2.253_024_752_505_745],    // face 13
  [5.891_865_957_979_238_5, 3.797_470_855_586_043, 1.703_075_753_192_847_6],  // face 14
  [2.711_123_289_609_793_3, 0.616_728_187_216_597_8, 4.805_518_392_002_988_7],// face 15
  [3.294_508_837_434_268, 1.200_113_735_041_073, 5.388_903_939_827_464],      // face 16
  [3.804_819_692_245_44, 1.710_424_589_852_244_5, 5.899_214_794_638_635],     // face 17
  [3.664_438_879_055_192_4, 1.570_043_776_661_997, 5.758_833_981_448_388],    // face 18
  [2.361_378_999_196_363, 0.266_983_896_803_167_6, 4.455_774_101_589_558_6],  // face 19
];

/// Transform into an adjacent face's IJK system.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FaceOrientIJK {
  /// Destination face number.
  pub(crate) face: i32,
  /// Res 0 translation relative to the primary face.
  pub(crate) translate: CoordIJK,
  /// 60 degree ccw rotations relative to the primary face.
  pub(crate) ccw_rot60: i32,
}

/// Neighboring face orientation per face, indexed by
/// central/IJ/KI/JK quadrant.
#[rustfmt::skip]
pub(crate) static FACE_NEIGHBORS: [[FaceOrientIJK; 4]; NUM_ICOSA_FACES as usize] = [
  // face 0
  [ FaceOrientIJK { face: 0, translate: CoordIJK { i: 0, j: 0, k: 0 }, ccw_rot60: 0 },
    FaceOrientIJK { face: 4, translate: CoordIJK { i: 2, j: 0, k: 2 }, ccw_rot60: 1 },
    FaceOrientIJK { face: 1, translate: CoordIJK { i: 2, j: 2, k: 0 }, ccw_rot60: 5 },
    FaceOrientIJK { face: 5, translate: CoordIJK { i: 0, j: 2, k: 2 }, ccw_rot60: 3 } ],
  // face 1
  [ FaceOrientIJK { face: 1, translate: CoordIJK { i: 0, j: 0, k: 0 }, ccw_rot60: 0 },
    FaceOrientIJK { face: 0, translate: CoordIJK { i: 2, j: 0, k: 2 }, ccw_rot60: 1 },
    FaceOrientIJK { face: 2, translate: CoordIJK { i: 2, j: 2, k: 0 }, ccw_rot60: 5 },
    FaceOrientIJK { face: 6, translate: CoordIJK { i: 0, j: 2, k: 2 }, ccw_rot60: 3 } ],
  // face 2
  [ FaceOrientIJK { face: 2, translate: CoordIJK { i: 0, j: 0, k: 0 }, ccw_rot60: 0 },
    FaceOrientIJK { face: 1, translate: CoordIJK { i: 2, j: 0, k: 2 }, ccw_rot60: 1 },
    FaceOrientIJK { face: 3, translate: CoordIJK { i: 2, j: 2, k: 0 }, ccw_rot60: 5 },
    FaceOrientIJK { face: 7, translate: CoordIJK { i: 0, j: 2, k: 2 }, ccw_rot60: 3 } ],
  // face 3
  [ FaceOrientIJK { face: 3, translate: CoordIJK { i: 0, j: 0, k: 0 }, ccw_rot60: 0 },
    FaceOrientIJK { face: 2, translate: CoordIJK { i: 2, j: 0, k: 2 }, ccw_rot60: 1 },
    FaceOrientIJK { face: 4, translate: CoordIJK { i: 2, j: 2, k: 0 }, ccw_rot60: 5 },
    FaceOrientIJK { face: 8, translate: CoordIJK { i: 0, j: 2, k: 2 }, ccw_rot60: 3 } ],
  // face 4
  [ FaceOrientIJK { face: 4, translate: CoordIJK { i: 0, j: 0, k: 0 }, ccw_rot60: 0 },
    FaceOrientIJK { face: 3, translate: CoordIJK { i: 2, j: 0, k: 2 }, ccw_rot60: 1 },
    FaceOrientIJK { face: 0, translate: CoordIJK { i: 2, j: 2, k: 0 }, ccw_rot60: 5 },
    FaceOrientIJK { face: 9, translate: CoordIJK { i: 0, j: 2, k: 2 }, ccw_rot60: 3 } ],
  // face 5
  [ FaceOrientIJK { face: 5, translate: CoordIJK { i: 0, j: 0, k: 0 }, ccw_rot60: 0 },
    FaceOrientIJK { face: 10, translate: CoordIJK { i: 2, j: 2, k: 0 }, ccw_rot60: 3 },
    FaceOrientIJK { face: 14, translate: CoordIJK { i: 2, j: 0, k: 2 }, ccw_rot60: 3 },
    FaceOrientIJK { face: 0, translate: CoordIJK { i: 0, j: 2, k: 2 }, ccw_rot60: 3 } ],
  // face 6
  [ FaceOrientIJK { face: 6, translate: CoordIJK { i: 0, j: 0, k: 0 }, ccw_rot60: 0 },
    FaceOrientIJK { face: 11, translate: CoordIJK { i: 2, j: 2, k: 0 }, ccw_rot60: 3 },
    FaceOrientIJK { face: 10, translate: CoordIJK { i: 2, j: 0, k: 2 }, ccw_rot60: 3 },
    FaceOrientIJK { face: 1, translate: CoordIJK { i: 0, j: 2, k: 2 }, ccw_rot60: 3 } ],
  // face 7
  [ FaceOrientIJK { face: 7, translate: CoordIJK { i: 0, j: 0, k: 0 }, ccw_rot60: 0 },
    FaceOrientIJK { face: 12, translate: CoordIJK { i: 2, j: 2, k: 0 }, ccw_rot60: 3 },
    FaceOrientIJK { face: 11, translate: CoordIJK { i: 2, j: 0, k: 2 }, ccw_rot60: 3 },
    FaceOrientIJK { face: 2, translate: CoordIJK { i: 0, j: 2, k: 2 }, ccw_rot60: 3 } ],
  // face 8
  [ FaceOrientIJK { face: 8, translate: CoordIJK { i: 0, j: 0, k: 0 }, ccw_rot60: 0 },
    FaceOrientIJK { face: 13, translate: CoordIJK { i: 2, j: 2, k: 0 }, ccw_rot60: 3 },
    FaceOrientIJK { face: 12, translate: CoordIJK { i: 2, j: 0, k: 2 }, ccw_rot60: 3 },
    FaceOrientIJK { face: 3, translate: CoordIJK { i: 0, j: 2, k: 2 }, ccw_rot60: 3 } ],
  // face 9
  [ FaceOrientIJK { face: 9, translate: CoordIJK { i: 0, j: 0, k: 0 }, ccw_rot60: 0 },
    FaceOrientIJK { face: 14, translate: CoordIJK { i: 2, j: 2, k: 0 }, ccw_rot60: 3 },
    FaceOrientIJK { face: 13, translate: CoordIJK { i: 2, j: 0, k: 2 }, ccw_rot60: 3 },
    FaceOrientIJK { face: 4, translate: CoordIJK { i: 0, j: 2, k: 2 }, ccw_rot60: 3 } ],
  // face 10
  [ FaceOrientIJK { face: 10, translate: CoordIJK { i: 0, j: 0, k: 0 }, ccw_rot60: 0 },
    FaceOrientIJK { face: 5, translate: CoordIJK { i: 2, j: 2, k: 0 }, ccw_rot60: 3 },
    FaceOrientIJK { face: 6, translate: CoordIJK { i: 2, j: 0, k: 2 }, ccw_rot60: 3 },
    FaceOrientIJK { face: 15, translate: CoordIJK { i: 0, j: 2, k: 2 }, ccw_rot60: 3 } ],
  // face 11
  [ FaceOrientIJK { face: 11, translate: CoordIJK { i: 0, j: 0, k: 0 }, ccw_rot60: 0 },
    FaceOrientIJK { face: 6, translate: CoordIJK { i: 2, j: 2, k: 0 }, ccw_rot60: 3 },
    FaceOrientIJK { face: 7, translate: CoordIJK { i: 2, j: 0, k: 2 }, ccw_rot60: 3 },
    FaceOrientIJK { face: 16, translate: CoordIJK { i: 0, j: 2, k: 2 }, ccw_rot60: 3 } ],
  // face 12
  [ FaceOrientIJK { face: 12, translate: CoordIJK { i: 0, j: 0, k: 0 }, ccw_rot60: 0 },
    FaceOrientIJK { face: 7, translate: CoordIJK { i: 2, j: 2, k: 0 }, ccw_rot60: 3 },
    FaceOrientIJK { face: 8, translate: CoordIJK { i: 2, j: 0, k: 2 }, ccw_rot60: 3 },
    FaceOrientIJK { face: 17, translate: CoordIJK { i: 0, j: 2, k: 2 }, ccw_rot60: 3 } ],
  // face 13
  [ FaceOrientIJK { face: 13, translate: CoordIJK { i: 0, j: 0, k: 0 }, ccw_rot60: 0 },
    FaceOrientIJK { face: 8, translate: CoordIJK { i: 2, j: 2, k: 0 }, ccw_rot60: 3 },
    FaceOrientIJK { face: 9, translate: CoordIJK { i: 2, j: 0, k: 2 }, ccw_rot60: 3 },
    FaceOrientIJK { face: 18, translate: CoordIJK { i: 0, j: 2, k: 2 }, ccw_rot60: 3 } ],
  // face 14
  [ FaceOrientIJK { face: 14, translate: CoordIJK { i: 0, j: 0, k: 0 }, ccw_rot60: 0 },
    FaceOrientIJK { face: 9, translate: CoordIJK { i: 2, j: 2, k: 0 }, ccw_rot60: 3 },
    FaceOrientIJK { face: 5, translate: CoordIJK { i: 2, j: 0, k: 2 }, ccw_rot60: 3 },
    FaceOrientIJK { face: 19, translate: CoordIJK { i: 0, j: 2, k: 2 }, ccw_rot60: 3 } ],
  // face 15
  [ FaceOrientIJK { face: 15, translate: CoordIJK { i: 0, j: 0, k: 0 }, ccw_rot60: 0 },
    FaceOrientIJK { face: 16, translate: CoordIJK { i: 2, j: 0, k: 2 }, ccw_rot60: 1 },
    FaceOrientIJK { face: 19, translate: CoordIJK { i: 2, j: 2, k: 0 }, ccw_rot60: 5 },
    FaceOrientIJK { face: 10, translate: CoordIJK { i: 0, j: 2, k: 2 }, ccw_rot60: 3 } ],
  // face 16
  [ FaceOrientIJK { face: 16, translate: CoordIJK { i: 0, j: 0, k: 0 }, ccw_rot60: 0 },
    FaceOrientIJK { face: 17, translate: CoordIJK { i: 2, j: 0, k: 2 }, ccw_rot60: 1 },
    FaceOrientIJK { face: 15, translate: CoordIJK { i: 2, j: 2, k: 0 }, ccw_rot60: 5 },
    FaceOrientIJK { face: 11, translate: CoordIJK { i: 0, j: 2, k: 2 }, ccw_rot60: 3 } ],
  // face 17
  [ FaceOrientIJK { face: 17, translate: CoordIJK { i: 0, j: 0, k: 0 }, ccw_rot60: 0 },
    FaceOrientIJK { face: 18, translate: CoordIJK { i: 2, j: 0, k: 2 }, ccw_rot60: 1 },
    FaceOrientIJK { face: 16, translate: CoordIJK { i: 2, j: 2, k: 0 }, ccw_rot60: 5 },
    FaceOrientIJK { face: 12, translate: CoordIJK { i: 0, j: 2, k: 2 }, ccw_rot60: 3 } ],
  // face 18
  [ FaceOrientIJK { face: 18, translate: CoordIJK { i: 0, j: 0, k: 0 }, ccw_rot60: 0 },
    FaceOrientIJK { face: 19, translate: CoordIJK { i: 2, j: 0, k: 2 }, ccw_rot60: 1 },
    FaceOrientIJK { face: 17, translate: CoordIJK { i: 2, j: 2, k: 0 }, ccw_rot60: 5 },
    FaceOrientIJK { face: 13, translate: CoordIJK { i: 0, j: 2, k: 2 }, ccw_rot60: 3 } ],
  // face 19
  [ FaceOrientIJK { face: 19, translate: CoordIJK { i: 0, j: 0, k: 0 }, ccw_rot60: 0 },
    FaceOrientIJK { face: 15, translate: CoordIJK { i: 2, j: 0, k: 2 }, ccw_rot60: 1 },
    FaceOrientIJK { face: 18, translate: CoordIJK { i: 2, j: 2, k: 0 }, ccw_rot60: 5 },
    FaceOrientIJK { face: 14, translate: CoordIJK { i: 0, j: 2, k: 2 }, ccw_rot60: 3 } ],
];

/// Direction from an origin face to a destination face, expressed as a
/// quadrant in the origin face's coordinate system, or -1 if the faces are
/// not adjacent.
#[rustfmt::skip]
pub(crate) static ADJACENT_FACE_DIR: [[i32; NUM_ICOSA_FACES as usize]; NUM_ICOSA_FACES as usize] = {
  const IJ: i32 = IJ_QUADRANT as i32;
  const KI: i32 = KI_QUADRANT as i32;
  const JK: i32 = JK_QUADRANT as i32;
  [
    // To face:  0   1   2   3   4   5   6   7   8   9  10  11  12  13  14  15  16  17  18  19
    /* from 0 */ [ 0, KI, -1, -1, IJ, JK, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1],
    /* from 1 */ [IJ,  0, KI, -1, -1, -1, JK, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1],
    /* from 2 */ [-1, IJ,  0, KI, -1, -1, -1, JK, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1],
    /* from 3 */ [-1, -1, IJ,  0, KI, -1, -1, -1, JK, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1],
    /* from 4 */ [KI, -1, -1, IJ,  0, -1, -1, -1, -1, JK, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1],
    /* from 5 */ [JK, -1, -1, -1, -1,  0, -1, -1, -1, -1, IJ, -1, -1, -1, KI, -1, -1, -1, -1, -1],
    /* from 6 */ [-1, JK, -1, -1, -1, -1,  0, -1, -1, -1, KI, IJ, -1, -1, -1, -1, -1, -1, -1, -1],
    /* from 7 */ [-1, -1, JK, -1, -1, -1, -1,  0, -1, -1, -1, KI, IJ, -1, -1, -1, -1, -1, -1, -1],
    /* from 8 */ [-1, -1, -1, JK, -1, -1, -1, -1,  0, -1, -1, -1, KI, IJ, -1, -1, -1, -1, -1, -1],
    /* from 9 */ [-1, -1, -1, -1, JK, -1, -1, -1, -1,  0, -1, -1, -1, KI, IJ, -1, -1, -1, -1, -1],
    /* from 10*/ [-1, -1, -1, -1, -1, IJ, KI, -1, -1, -1,  0, -1, -1, -1, -1, JK, -1, -1, -1, -1],
    /* from 11*/ [-1, -1, -1, -1, -1, -1, IJ, KI, -1, -1, -1,  0, -1, -1, -1, -1, JK, -1, -1, -1],
    /* from 12*/ [-1, -1, -1, -1, -1, -1, -1, IJ, KI, -1, -1, -1,  0, -1, -1, -1, -1, JK, -1, -1],
    /* from 13*/ [-1, -1, -1, -1, -1, -1, -1, -1, IJ, KI, -1, -1, -1,  0, -1, -1, -1, -1, JK, -1],
    /* from 14*/ [-1, -1, -1, -1, -1, KI, -1, -1, -1, IJ, -1, -1, -1, -1,  0, -1, -1, -1, -1, JK],
    /* from 15*/ [-1, -1, -1, -1, -1, -1, -1, -1, -1, -1, JK, -1, -1, -1, -1,  0, IJ, -1, -1, KI],
    /* from 16*/ [-1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, JK, -1, -1, -1, KI,  0, IJ, -1, -1],
    /* from 17*/ [-1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, JK, -1, -1, -1, KI,  0, IJ, -1],
    /* from 18*/ [-1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, JK, -1, -1, -1, KI,  0, IJ],
    /* from 19*/ [-1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, JK, IJ, -1, -1, KI,  0],
  ]
};

/// Where a coordinate landed relative to its face after an overage check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Overage {
  /// On the original face.
  NoOverage = 0,
  /// On a face edge; substrate grids only.
  FaceEdge = 1,
  /// Past the edge, on a new face.
  NewFace = 2,
}

/// Finds the icosahedron face whose center is closest to the point, along
/// with the squared Euclidean chord distance to that center.
#[inline]
pub(crate) fn geo_to_closest_face(g: &LatLng, face: &mut i32, sqd: &mut f64) {
  let mut v3d = Vec3d::default();
  geo_to_vec3d(g, &mut v3d);

  *face = 0;
  *sqd = 5.0;
  for (f, center) in FACE_CENTER_POINT.iter().enumerate() {
    let d = point_square_dist(center, &v3d);
    if d < *sqd {
      *face = f as i32;
      *sqd = d;
    }
  }
}

/// Gnomonic projection of a point onto the closest face's hex plane,
/// scaled for the given resolution.
pub(crate) fn geo_to_hex2d(g: &LatLng, res: i32, face: &mut i32, v: &mut Vec2d) {
  let mut sqd = 0.0;
  geo_to_closest_face(g, face, &mut sqd);

  // cos(r) from the chord length
  let r = (1.0 - sqd * 0.5).clamp(-1.0, 1.0).acos();
  if r < EPSILON {
    v.x = 0.0;
    v.y = 0.0;
    return;
  }

  let az = geo_azimuth_rads(&FACE_CENTER_GEO[*face as usize], g);
  let mut theta = pos_angle_rads(FACE_AXES_AZ_RADS_CII[*face as usize][0] - pos_angle_rads(az));

  // adjust theta for Class III grid orientation
  if is_resolution_class_iii(res) {
    theta = pos_angle_rads(theta - AP7_ROT_RADS);
  }

  // gnomonic scaling, then scale for the resolution
  let mut r_scaled = r.tan() * INV_RES0_U_GNOMONIC;
  for _ in 0..res {
    r_scaled *= SQRT7;
  }

  v.x = r_scaled * theta.cos();
  v.y = r_scaled * theta.sin();
}

/// Inverse gnomonic projection of a hex-plane point back to spherical
/// coordinates. `substrate` marks coordinates on the tripled vertex grid.
pub(crate) fn hex2d_to_geo(v: &Vec2d, face: i32, res: i32, substrate: bool, g: &mut LatLng) {
  let mut r = v2d_mag(v);
  if r < EPSILON {
    *g = FACE_CENTER_GEO[face as usize];
    return;
  }

  let mut theta = v.y.atan2(v.x);

  // scale back to res 0
  for _ in 0..res {
    r *= RSQRT7;
  }

  if substrate {
    r /= 3.0;
    if is_resolution_class_iii(res) {
      r *= RSQRT7;
    }
  }

  r = (r * RES0_U_GNOMONIC).atan();

  // Class III grids are rotated relative to the face axes
  if !substrate && is_resolution_class_iii(res) {
    theta = pos_angle_rads(theta + AP7_ROT_RADS);
  }

  let az = pos_angle_rads(FACE_AXES_AZ_RADS_CII[face as usize][0] - theta);
  geo_az_distance_rads(&FACE_CENTER_GEO[face as usize], az, r, g);
}

/// Containing cell for a spherical point at the given resolution.
#[inline]
pub(crate) fn geo_to_face_ijk(g: &LatLng, res: i32, h: &mut FaceIJK) {
  let mut v = Vec2d::default();
  geo_to_hex2d(g, res, &mut h.face, &mut v);
  hex2d_to_coord_ijk(&v, &mut h.coord);
}

/// Cell center point in spherical coordinates.
#[inline]
pub(crate) fn face_ijk_to_geo(h: &FaceIJK, res: i32, g: &mut LatLng) {
  let mut v = Vec2d::default();
  ijk_to_hex2d(&h.coord, &mut v);
  hex2d_to_geo(&v, h.face, res, false, g);
}

/// Moves coordinates that fall outside their face onto the proper adjacent
/// face. `pent_leading_4` applies the extra rotation for pentagonal cells
/// with a leading digit 4; `substrate` triples the face dimensions.
pub(crate) fn adjust_overage_class_ii(fijk: &mut FaceIJK, res: i32, pent_leading_4: bool, substrate: bool) -> Overage {
  let mut overage = Overage::NoOverage;
  let ijk = &mut fijk.coord;

  let max_dim_base = MAX_DIM_BY_CII_RES[res as usize];
  let max_dim = if substrate { max_dim_base * 3 } else { max_dim_base };

  let coord_sum = ijk.i + ijk.j + ijk.k;
  if substrate && coord_sum == max_dim {
    return Overage::FaceEdge;
  }
  if coord_sum > max_dim {
    overage = Overage::NewFace;

    let orient = if ijk.k > 0 {
      if ijk.j > 0 {
        &FACE_NEIGHBORS[fijk.face as usize][JK_QUADRANT]
      } else {
        // in the K-I quadrant the pentagon's leading-4 subsequence is
        // rotated out of the way before translating
        if pent_leading_4 {
          let mut origin = CoordIJK::default();
          set_ijk(&mut origin, max_dim_base, 0, 0);
          let mut tmp = CoordIJK::default();
          ijk_sub(ijk, &origin, &mut tmp);
          ijk_rotate60_cw(&mut tmp);
          ijk_add(&tmp, &origin, ijk);
        }
        &FACE_NEIGHBORS[fijk.face as usize][KI_QUADRANT]
      }
    } else {
      &FACE_NEIGHBORS[fijk.face as usize][IJ_QUADRANT]
    };

    fijk.face = orient.face;

    for _ in 0..orient.ccw_rot60 {
      ijk_rotate60_ccw(ijk);
    }

    let mut trans = orient.translate;
    let mut unit_scale = UNIT_SCALE_BY_CII_RES[res as usize];
    if substrate {
      unit_scale *= 3;
    }
    ijk_scale(&mut trans, unit_scale);
    let before = *ijk;
    ijk_add(&before, &trans, ijk);
    ijk_normalize(ijk);

    // the translation may have moved the coordinate onto the new face's edge
    if substrate && ijk.i + ijk.j + ijk.k == max_dim {
      overage = Overage::FaceEdge;
    }
  }

  overage
}

/// Repeatedly adjusts a pentagonal vertex coordinate until it stops
/// crossing onto new faces.
#[inline]
pub(crate) fn adjust_pent_vert_overage(fijk: &mut FaceIJK, res: i32) -> Overage {
  loop {
    let overage = adjust_overage_class_ii(fijk, res, false, true);
    if overage != Overage::NewFace {
      return overage;
    }
  }
}

// Endpoints on the substrate plane of the face edge crossed when leaving
// through the given quadrant.
fn icosa_edge(max_dim_substrate: i32, quadrant: usize) -> (Vec2d, Vec2d) {
  let d = f64::from(max_dim_substrate);
  let v0 = Vec2d { x: d, y: 0.0 };
  let v1 = Vec2d {
    x: -0.5 * d,
    y: SIN60 * d,
  };
  let v2 = Vec2d {
    x: -0.5 * d,
    y: -SIN60 * d,
  };
  match quadrant {
    IJ_QUADRANT => (v0, v1),
    JK_QUADRANT => (v1, v2),
    _ => (v2, v0), // KI
  }
}

/// Boundary of a pentagonal cell in spherical coordinates. `start` and
/// `length` select a contiguous run of topological vertices, allowing a
/// single edge to be extracted.
pub(crate) fn face_ijk_pent_to_cell_boundary(h: &FaceIJK, res: i32, start: i32, length: i32, g: &mut CellBoundary) {
  let mut adj_res = res;
  let mut center = *h;

  let mut fijk_verts = [FaceIJK::default(); NUM_PENT_VERTS];
  face_ijk_pent_to_verts(&mut center, &mut adj_res, &mut fijk_verts);

  // convert each vertex to lat/lng; every Class III pentagon edge crosses
  // an icosahedron edge and picks up a distortion vertex there (Class II
  // pentagon vertices sit on the face edges instead)
  g.num_verts = 0;
  let additional_iteration = if length == NUM_PENT_VERTS as i32 { 1 } else { 0 };
  let mut last_fijk = FaceIJK::default();

  for vert in 0..(length + additional_iteration) {
    let v = (start + vert) % NUM_PENT_VERTS as i32;

    let mut fijk = fijk_verts[v as usize];
    let _ = adjust_pent_vert_overage(&mut fijk, adj_res);

    if is_resolution_class_iii(res) && vert > 0 {
      // the crossing is found in the previous vertex's face system:
      // express the current vertex there, then intersect the segment with
      // the edge toward the current vertex's face
      let mut prev2d = Vec2d::default();
      ijk_to_hex2d(&last_fijk.coord, &mut prev2d);

      let current_to_last = ADJACENT_FACE_DIR[fijk.face as usize][last_fijk.face as usize];
      let orient = &FACE_NEIGHBORS[fijk.face as usize][current_to_last as usize];

      let mut tmp = fijk;
      tmp.face = orient.face;
      for _ in 0..orient.ccw_rot60 {
        ijk_rotate60_ccw(&mut tmp.coord);
      }
      let mut trans = orient.translate;
      ijk_scale(&mut trans, UNIT_SCALE_BY_CII_RES[adj_res as usize] * 3);
      let before = tmp.coord;
      ijk_add(&before, &trans, &mut tmp.coord);
      ijk_normalize(&mut tmp.coord);

      let mut curr2d = Vec2d::default();
      ijk_to_hex2d(&tmp.coord, &mut curr2d);

      let max_dim = MAX_DIM_BY_CII_RES[adj_res as usize] * 3;
      let edge_dir = ADJACENT_FACE_DIR[tmp.face as usize][fijk.face as usize];
      let (edge0, edge1) = icosa_edge(max_dim, edge_dir as usize);

      let mut inter = Vec2d::default();
      v2d_intersect(&prev2d, &curr2d, &edge0, &edge1, &mut inter);

      if g.num_verts < MAX_CELL_BNDRY_VERTS {
        hex2d_to_geo(&inter, tmp.face, adj_res, true, &mut g.verts[g.num_verts]);
        g.num_verts += 1;
      }
    }

    if vert < length {
      let mut v2d = Vec2d::default();
      ijk_to_hex2d(&fijk.coord, &mut v2d);
      hex2d_to_geo(&v2d, fijk.face, adj_res, true, &mut g.verts[g.num_verts]);
      g.num_verts += 1;
    }

    last_fijk = fijk;
  }
}

/// Boundary of a hexagonal cell in spherical coordinates. `start` and
/// `length` select a contiguous run of topological vertices.
pub(crate) fn face_ijk_to_cell_boundary(h: &FaceIJK, res: i32, start: i32, length: i32, g: &mut CellBoundary) {
  let mut adj_res = res;
  let mut center = *h;

  let mut fijk_verts = [FaceIJK::default(); NUM_HEX_VERTS];
  face_ijk_to_verts(&mut center, &mut adj_res, &mut fijk_verts);

  g.num_verts = 0;
  let additional_iteration = if length == NUM_HEX_VERTS as i32 { 1 } else { 0 };
  let mut last_fijk = FaceIJK::default();
  let mut last_overage = Overage::NoOverage;

  for vert in 0..(length + additional_iteration) {
    let v = (start + vert) % NUM_HEX_VERTS as i32;

    let mut fijk = fijk_verts[v as usize];
    let overage = adjust_overage_class_ii(&mut fijk, adj_res, false, true);

    // Class III cells cross face edges mid-segment; add the intersection
    // with the face edge as an extra boundary vertex
    if is_resolution_class_iii(res) && vert > 0 && fijk.face != last_fijk.face && last_overage != Overage::FaceEdge {
      let last_v = (start + vert - 1) % NUM_HEX_VERTS as i32;

      let mut prev2d = Vec2d::default();
      ijk_to_hex2d(&fijk_verts[last_v as usize].coord, &mut prev2d);
      let mut curr2d = Vec2d::default();
      ijk_to_hex2d(&fijk_verts[v as usize].coord, &mut curr2d);

      let face2 = if fijk.face != center.face { fijk.face } else { last_fijk.face };
      let edge_dir = ADJACENT_FACE_DIR[center.face as usize][face2 as usize];

      if (1..4).contains(&edge_dir) {
        let max_dim = MAX_DIM_BY_CII_RES[adj_res as usize] * 3;
        let (edge0, edge1) = icosa_edge(max_dim, edge_dir as usize);

        let mut inter = Vec2d::default();
        v2d_intersect(&prev2d, &curr2d, &edge0, &edge1, &mut inter);

        // the intersection may coincide with a vertex when it lies exactly
        // on the face edge
        if !v2d_almost_equals(&prev2d, &inter)
          && !v2d_almost_equals(&curr2d, &inter)
          && g.num_verts < MAX_CELL_BNDRY_VERTS
        {
          hex2d_to_geo(&inter, center.face, adj_res, true, &mut g.verts[g.num_verts]);
          g.num_verts += 1;
        }
      }
    }

    if vert < length && g.num_verts < MAX_CELL_BNDRY_VERTS {
      let mut v2d = Vec2d::default();
      ijk_to_hex2d(&fijk.coord, &mut v2d);
      hex2d_to_geo(&v2d, fijk.face, adj_res, true, &mut g.verts[g.num_verts]);
      g.num_verts += 1;
    }

    last_fijk = fijk;
    last_overage = overage;
  }
}

/// Vertex coordinates for a hexagonal cell on the substrate grid. Updates
/// `fijk` and `res` to the substrate center and resolution.
pub(crate) fn face_ijk_to_verts(fijk: &mut FaceIJK, res: &mut i32, fijk_verts: &mut [FaceIJK; NUM_HEX_VERTS]) {
  // vertices of the cell on the substrate grid, Class II and Class III
  #[rustfmt::skip]
  const VERTS_CII: [CoordIJK; NUM_HEX_VERTS] = [
    CoordIJK { i: 2, j: 1, k: 0 }, CoordIJK { i: 1, j: 2, k: 0 },
    CoordIJK { i: 0, j: 2, k: 1 }, CoordIJK { i: 0, j: 1, k: 2 },
    CoordIJK { i: 1, j: 0, k: 2 }, CoordIJK { i: 2, j: 0, k: 1 },
  ];
  #[rustfmt::skip]
  const VERTS_CIII: [CoordIJK; NUM_HEX_VERTS] = [
    CoordIJK { i: 5, j: 4, k: 0 }, CoordIJK { i: 1, j: 5, k: 0 },
    CoordIJK { i: 0, j: 5, k: 4 }, CoordIJK { i: 0, j: 1, k: 5 },
    CoordIJK { i: 4, j: 0, k: 5 }, CoordIJK { i: 5, j: 0, k: 1 },
  ];

  let verts = if is_resolution_class_iii(*res) { &VERTS_CIII } else { &VERTS_CII };

  // to the substrate grid: aperture 3, then aperture 3 reverse, and for
  // Class III one more aperture 7 reverse to get to a Class II grid
  down_ap3(&mut fijk.coord);
  down_ap3r(&mut fijk.coord);
  if is_resolution_class_iii(*res) {
    down_ap7r(&mut fijk.coord);
    *res += 1;
  }

  for (out, vert) in fijk_verts.iter_mut().zip(verts.iter()) {
    out.face = fijk.face;
    ijk_add(&fijk.coord, vert, &mut out.coord);
    ijk_normalize(&mut out.coord);
  }
}

/// Vertex coordinates for a pentagonal cell on the substrate grid.
pub(crate) fn face_ijk_pent_to_verts(
  fijk: &mut FaceIJK,
  res: &mut i32,
  fijk_verts: &mut [FaceIJK; NUM_PENT_VERTS],
) {
  #[rustfmt::skip]
  const VERTS_CII: [CoordIJK; NUM_PENT_VERTS] = [
    CoordIJK { i: 2, j: 1, k: 0 }, CoordIJK { i: 1, j: 2, k: 0 },
    CoordIJK { i: 0, j: 2, k: 1 }, CoordIJK { i: 0, j: 1, k: 2 },
    CoordIJK { i: 1, j: 0, k: 2 },
  ];
  #[rustfmt::skip]
  const VERTS_CIII: [CoordIJK; NUM_PENT_VERTS] = [
    CoordIJK { i: 5, j: 4, k: 0 }, CoordIJK { i: 1, j: 5, k: 0 },
    CoordIJK { i: 0, j: 5, k: 4 }, CoordIJK { i: 0, j: 1, k: 5 },
    CoordIJK { i: 4, j: 0, k: 5 },
  ];

  let verts = if is_resolution_class_iii(*res) { &VERTS_CIII } else { &VERTS_CII };

  down_ap3(&mut fijk.coord);
  down_ap3r(&mut fijk.coord);
  if is_resolution_class_iii(*res) {
    down_ap7r(&mut fijk.coord);
    *res += 1;
  }

  for (out, vert) in fijk_verts.iter_mut().zip(verts.iter()) {
    out.face = fijk.face;
    ijk_add(&fijk.coord, vert, &mut out.coord);
    ijk_normalize(&mut out.coord);
  }
}
