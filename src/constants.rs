//! Grid topology and bit-layout constants.

use std::f64::consts::{FRAC_PI_2, PI};

use crate::BBox;

/// Two pi.
pub const TWO_PI: f64 = 2.0 * PI;

/// General purpose comparison epsilon.
pub const EPSILON: f64 = 0.000_000_000_000_000_1;
/// Positional epsilon in degrees, roughly 0.1mm on the surface.
pub const EPSILON_DEG: f64 = 0.000_000_001;
/// Positional epsilon in radians.
pub const EPSILON_RAD: f64 = EPSILON_DEG * PI / 180.0;

/// sin(60 degrees), i.e. sqrt(3) / 2.
pub const SIN60: f64 = 0.866_025_403_784_438_6;
/// 1 / sin(60 degrees).
pub const RSIN60: f64 = 1.0 / SIN60;
/// sqrt(7).
pub const SQRT7: f64 = 2.645_751_311_064_590_6;
/// 1 / sqrt(7).
pub const RSQRT7: f64 = 1.0 / SQRT7;

/// Rotation angle between Class II and Class III resolution axes,
/// asin(sqrt(3 / 28)).
pub const AP7_ROT_RADS: f64 = 0.333_473_172_251_832_1;
/// sin(`AP7_ROT_RADS`).
pub const SIN_AP7_ROT: f64 = 0.327_326_835_353_988_57;
/// cos(`AP7_ROT_RADS`).
pub const COS_AP7_ROT: f64 = 0.944_911_182_523_068_1;

/// Earth authalic radius in kilometers (WGS84).
pub const EARTH_RADIUS_KM: f64 = 6371.007_180_918_475;

/// Scaling factor from the resolution-0 unit length on the hex plane
/// (distance between adjacent cell centers) to gnomonic unit length.
pub const RES0_U_GNOMONIC: f64 = 0.381_966_011_250_105;
/// Inverse of `RES0_U_GNOMONIC`.
pub const INV_RES0_U_GNOMONIC: f64 = 1.0 / RES0_U_GNOMONIC;

/// Finest grid resolution. Resolutions are numbered 0 through 15.
pub const MAX_RES: i32 = 15;
/// Number of icosahedron faces.
pub const NUM_ICOSA_FACES: i32 = 20;
/// Number of resolution-0 base cells.
pub const NUM_BASE_CELLS: i32 = 122;
/// Topological vertex count of a hexagon cell.
pub const NUM_HEX_VERTS: usize = 6;
/// Topological vertex count of a pentagon cell.
pub const NUM_PENT_VERTS: usize = 5;
/// Worst-case boundary vertex count: a pentagon with all five distortion
/// vertices.
pub const MAX_CELL_BNDRY_VERTS: usize = 10;
/// Number of pentagon cells at every resolution.
pub const NUM_PENTAGONS: i32 = 12;

// 64-bit index layout: 1 high bit, 4 mode bits, 3 reserved bits,
// 4 resolution bits, 7 base-cell bits, then 15 x 3-bit digits.

/// Bit offset of the mode field.
pub const MODE_OFFSET: u8 = 59;
/// Bit offset of the reserved field.
pub const RESERVED_OFFSET: u8 = 56;
/// Bit offset of the resolution field.
pub const RES_OFFSET: u8 = 52;
/// Bit offset of the base-cell field.
pub const BASE_CELL_OFFSET: u8 = 45;
/// Width in bits of one refinement digit.
pub const PER_DIGIT_OFFSET: u8 = 3;

/// Mask selecting the high bit.
pub const HIGH_BIT_MASK: u64 = 1u64 << 63;
/// Mask selecting the mode field.
pub const MODE_MASK: u64 = 0b1111u64 << MODE_OFFSET;
/// Mask selecting the reserved field.
pub const RESERVED_MASK: u64 = 0b111u64 << RESERVED_OFFSET;
/// Mask selecting the resolution field.
pub const RES_MASK: u64 = 0b1111u64 << RES_OFFSET;
/// Mask selecting the base-cell field.
pub const BASE_CELL_MASK: u64 = 0b111_1111u64 << BASE_CELL_OFFSET;
/// Mask selecting one (unshifted) digit.
pub const DIGIT_MASK: u64 = 0b111u64;

/// Mode tag for cell indexes.
pub const CELL_MODE: u8 = 1;
/// Mode tag for directed edge indexes.
pub const DIRECTED_EDGE_MODE: u8 = 2;
/// Mode tag for undirected edge indexes. Reserved; no operations use it.
pub const UNDIRECTED_EDGE_MODE: u8 = 3;
/// Mode tag for vertex indexes.
pub const VERTEX_MODE: u8 = 4;

/// Blank index template: mode 0, resolution 0, base cell 0, and all 15
/// digits set to the unused sentinel 7.
pub const INDEX_BLANK: u64 = 0x1fff_ffff_ffff;

/// Total number of cells at `MAX_RES`: 2 + 120 * 7^15.
pub const NUM_CELLS_MAX_RES: i64 = 569_707_381_193_162;

/// Maximum cell edge length in radians per resolution, taken over the
/// cells at each base cell center.
#[rustfmt::skip]
pub const MAX_EDGE_LENGTH_RADS: [f64; (MAX_RES + 1) as usize] = [
  0.215_772_062_651_30,
  0.083_087_670_684_95,
  0.031_489_704_364_39,
  0.011_906_628_714_39,
  0.004_500_533_309_08,
  0.001_701_055_236_19,
  0.000_642_939_176_78,
  0.000_243_008_206_59,
  0.000_091_848_470_87,
  0.000_034_715_459_01,
  0.000_013_121_210_17,
  0.000_004_959_351_29,
  0.000_001_874_458_60,
  0.000_000_708_478_76,
  0.000_000_267_779_80,
  0.000_000_101_211_25,
];

/// The cell containing the North Pole at each resolution.
#[rustfmt::skip]
pub const NORTH_POLE_CELLS: [u64; (MAX_RES + 1) as usize] = [
  0x8001fffffffffff, 0x81033ffffffffff, 0x820327fffffffff, 0x830326fffffffff,
  0x8403263ffffffff, 0x85032623fffffff, 0x860326237ffffff, 0x870326233ffffff,
  0x880326233bfffff, 0x890326233abffff, 0x8a0326233ab7fff, 0x8b0326233ab0fff,
  0x8c0326233ab03ff, 0x8d0326233ab03bf, 0x8e0326233ab039f, 0x8f0326233ab0399,
];

/// The cell containing the South Pole at each resolution.
#[rustfmt::skip]
pub const SOUTH_POLE_CELLS: [u64; (MAX_RES + 1) as usize] = [
  0x80f3fffffffffff, 0x81f2bffffffffff, 0x82f297fffffffff, 0x83f293fffffffff,
  0x84f2939ffffffff, 0x85f29383fffffff, 0x86f29380fffffff, 0x87f29380effffff,
  0x88f29380e1fffff, 0x89f29380e0fffff, 0x8af29380e0d7fff, 0x8bf29380e0d0fff,
  0x8cf29380e0d0dff, 0x8df29380e0d0cff, 0x8ef29380e0d0cc7, 0x8ff29380e0d0cc4,
];

/// Bounding-box scale factor that is guaranteed to cover a cell.
pub const CELL_SCALE_FACTOR: f64 = 1.1;
/// Bounding-box scale factor that is guaranteed to cover a cell and all of
/// its children.
pub const CHILD_SCALE_FACTOR: f64 = 1.4;

/// Valid range for geographic input, in radians.
pub const VALID_RANGE_BBOX: BBox = BBox {
  north: FRAC_PI_2,
  south: -FRAC_PI_2,
  east: PI,
  west: -PI,
};

/// Precomputed bounding boxes for the 122 resolution-0 base cells, in
/// radians.
#[rustfmt::skip]
pub const RES0_BBOXES: [BBox; NUM_BASE_CELLS as usize] = [
  BBox { north:  1.5248015836, south:  1.1787242429, east:  2.0562234494, west:  0.4377760900 },
  BBox { north:  1.5248015836, south:  1.1787242429, east: -0.6066488365, west:  2.5404698032 },
  BBox { north:  1.5248015836, south:  1.0906938732, east: -2.2499013873, west: -2.8528605332 },
  BBox { north:  1.4184530255, south:  1.0128514572, east:  0.0056829727, west: -1.1677037961 },
  BBox { north:  1.2795047789, south:  0.9722665256, east:  0.5555606501, west: -0.1822992482 },
  BBox { north:  1.3292958660, south:  0.9189892077, east:  2.0562234494, west:  1.0881315428 },
  BBox { north:  1.3289908609, south:  0.9427181540, east: -2.2987528958, west:  3.0170000806 },
  BBox { north:  1.2602098388, south:  0.8429122844, east: -0.8997186764, west: -1.7596735929 },
  BBox { north:  1.2111467388, south:  0.8617060094, east:  1.1912975761, west:  0.4377760900 },
  BBox { north:  1.2107583144, south:  0.8379533107, east: -1.7202287576, west: -2.4379386170 },
  BBox { north:  1.1554653095, south:  0.7898245541, east:  2.5365941223, west:  1.8570913345 },
  BBox { north:  1.1552844509, south:  0.7664142875, east: -3.0673850718, west:  2.5364611027 },
  BBox { north:  1.1012164356, south:  0.7133009368, east:  0.0964058190, west: -0.5215451449 },
  BBox { north:  1.0704247279, south:  0.6760394884, east: -0.4798420282, west: -1.1030615958 },
  BBox { north:  1.0327022877, south:  0.7235635885, east: -2.2499013873, west: -2.7451022089 },
  BBox { north:  1.0192992465, south:  0.6549123286, east:  0.6303557424, west:  0.0353703010 },
  BBox { north:  1.0178603759, south:  0.5882763676, east:  1.5319272182, west:  0.9367268251 },
  BBox { north:  0.9808143416, south:  0.6107606356, east: -2.6710063657, west:  3.0651646303 },
  BBox { north:  0.9810602322, south:  0.5867983660, east:  2.0282976621, west:  1.5133437497 },
  BBox { north:  0.9637455181, south:  0.5518649176, east: -1.4297672129, west: -1.9685220251 },
  BBox { north:  0.8753613623, south:  0.5000895279, east: -1.9243561355, west: -2.4164134319 },
  BBox { north:  0.8861124347, south:  0.5274296374, east: -0.9578194630, west: -1.4762896628 },
  BBox { north:  0.8688134327, south:  0.5077056705, east:  1.0323679550, west:  0.5034728403 },
  BBox { north:  0.8923563821, south:  0.4878126492, east:  2.7643030212, west:  2.2998971670 },
  BBox { north:  0.8257056928, south:  0.5217310176, east:  2.3092168149, west:  1.9319854185 },
  BBox { north:  0.8059933046, south:  0.4015081960, east: -3.0641755938, west:  2.7007930081 },
  BBox { north:  0.8161207973, south:  0.3839680066, east: -0.2161437887, west: -0.7042014970 },
  BBox { north:  0.7582277987, south:  0.3994355541, east: -2.3405997806, west: -2.8212737380 },
  BBox { north:  0.7886139100, south:  0.3874201833, east:  0.2311568773, west: -0.2259949106 },
  BBox { north:  0.7151584037, south:  0.3301247846, east: -0.6484797614, west: -1.0824972810 },
  BBox { north:  0.7035905107, south:  0.2914867320, east:  1.7144108186, west:  1.2844334838 },
  BBox { north:  0.6919062957, south:  0.2880831321, east:  0.6486390924, west:  0.1637236928 },
  BBox { north:  0.6486323568, south:  0.2629042009, east:  2.1031809827, west:  1.6955612255 },
  BBox { north:  0.6572289230, south:  0.2822265333, east:  1.3091869329, west:  0.8759441627 },
  BBox { north:  0.6475099776, south:  0.2414986573, east: -1.3027219245, west: -1.6870857014 },
  BBox { north:  0.6238017405, south:  0.2552208039, east: -2.7242842300, west:  3.1040147326 },
  BBox { north:  0.6422846044, south:  0.2120675345, east: -1.6763924097, west: -2.1177236674 },
  BBox { north:  0.5991917539, south:  0.2162046086, east:  2.4859286839, west:  2.0735035389 },
  BBox { north:  0.5563740687, south:  0.2527655746, east: -0.9988538848, west: -1.3264248933 },
  BBox { north:  0.5564801333, south:  0.1518740134, east:  2.8703208842, west:  2.4464232048 },
  BBox { north:  0.5460368800, south:  0.1558909154, east: -2.0678986604, west: -2.4909141961 },
  BBox { north:  0.5120634778, south:  0.1552202040, east:  0.9544676732, west:  0.5444326211 },
  BBox { north:  0.4976795156, south:  0.1094489892, east: -0.0433516224, west: -0.4290026815 },
  BBox { north:  0.4653804551, south:  0.0602996866, east: -0.4124061369, west: -0.8060362378 },
  BBox { north:  0.4468689109, south:  0.0692685748, east:  0.3205328479, west: -0.0700574888 },
  BBox { north:  0.4320895823, south:  0.0779644096, east: -3.0623245305, west:  2.8060249999 },
  BBox { north:  0.4310389261, south:  0.0292743194, east: -2.4158923859, west: -2.8573580993 },
  BBox { north:  0.3807372758, south: -0.0029701614, east: -0.7703955384, west: -1.1478824872 },
  BBox { north:  0.3911381671, south: -0.0151876488, east:  1.4913024696, west:  1.1471473174 },
  BBox { north:  0.3342106317, south:  0.0252661345, east:  1.1514103258, west:  0.8500070626 },
  BBox { north:  0.3891566980, south: -0.0437135980, east:  1.8804635394, west:  1.4823023138 },
  BBox { north:  0.3378752085, south: -0.0483509010, east: -1.1227401436, west: -1.4945440882 },
  BBox { north:  0.3360141896, south: -0.0667506815, east:  2.2379235421, west:  1.8572342301 },
  BBox { north:  0.3183831810, south: -0.0582195560, east:  0.6605885406, west:  0.2545257294 },
  BBox { north:  0.3363076150, south: -0.0758954099, east: -1.4795733172, west: -1.8598173569 },
  BBox { north:  0.2892481735, south: -0.0915063804, east: -1.8356193026, west: -2.2185589736 },
  BBox { north:  0.2667863228, south: -0.1005808897, east: -2.7680865196, west:  3.1279295327 },
  BBox { north:  0.2928525414, south: -0.1348316507, east:  2.6140646838, west:  2.2046642291 },
  BBox { north:  0.2015034281, south: -0.1027985271, east:  0.0688189634, west: -0.2392522941 },
  BBox { north:  0.2128381330, south: -0.1862683539, east:  2.9380044026, west:  2.5747074766 },
  BBox { north:  0.1958761421, south: -0.1723703028, east: -2.1694179540, west: -2.5540516588 },
  BBox { north:  0.1723703033, south: -0.1958761415, east:  0.9721746993, west:  0.5875409945 },
  BBox { north:  0.1862683544, south: -0.2128381325, east: -0.2035882508, west: -0.5668851768 },
  BBox { north:  0.1027985275, south: -0.2015034276, east: -3.0727736899, west:  2.9023403595 },
  BBox { north:  0.1348316512, south: -0.2928525409, east: -0.5275279695, west: -0.9369284242 },
  BBox { north:  0.1005808902, south: -0.2667863222, east:  0.3735061337, west: -0.0136631208 },
  BBox { north:  0.0915063809, south: -0.2892481729, east:  1.3059733507, west:  0.9230336798 },
  BBox { north:  0.0758954106, south: -0.3363076144, east:  1.6620193362, west:  1.2817752964 },
  BBox { north:  0.0582195565, south: -0.3183831805, east: -2.4810041127, west: -2.8870669240 },
  BBox { north:  0.0667506820, south: -0.3360141890, east: -0.9036691113, west: -1.2843584232 },
  BBox { north:  0.0483509015, south: -0.3378752080, east:  2.0188525098, west:  1.6470485652 },
  BBox { north:  0.0437135985, south: -0.3891566975, east: -1.2611291140, west: -1.6592903395 },
  BBox { north: -0.0252661340, south: -0.3342106311, east: -1.9901823275, west: -2.2915855907 },
  BBox { north:  0.0151876493, south: -0.3911381666, east: -1.6502901838, west: -1.9944453360 },
  BBox { north:  0.0029701618, south: -0.3807372753, east:  2.3711971150, west:  1.9937101662 },
  BBox { north: -0.0292743189, south: -0.4310389256, east:  0.7257002674, west:  0.2842345541 },
  BBox { north: -0.0779644091, south: -0.4320895817, east:  0.0792681228, west: -0.3355676534 },
  BBox { north: -0.0692685743, south: -0.4468689104, east: -2.8210598054, west:  3.0715351648 },
  BBox { north: -0.0602996861, south: -0.4653804545, east:  2.7291865165, west:  2.3355564155 },
  BBox { north: -0.1094489886, south: -0.4976795151, east:  3.0982410310, west:  2.7125899718 },
  BBox { north: -0.1552202035, south: -0.5120634772, east: -2.1871249802, west: -2.5971600322 },
  BBox { north: -0.1558909148, south: -0.5460368794, east:  1.0736939929, west:  0.6506784573 },
  BBox { north: -0.1518740130, south: -0.5564801327, east: -0.2712717691, west: -0.6951694486 },
  BBox { north: -0.2527655741, south: -0.5563740682, east:  2.1427387686, west:  1.8151677600 },
  BBox { north: -0.2162046081, south: -0.5991917533, east: -0.6556639695, west: -1.0680891144 },
  BBox { north: -0.2120675340, south: -0.6422846038, east:  1.4652002437, west:  1.0238689859 },
  BBox { north: -0.2552208034, south: -0.6238017399, east:  0.4173084233, west: -0.0375779209 },
  BBox { north: -0.2414986568, south: -0.6475099771, east:  1.8388707289, west:  1.4545069520 },
  BBox { north: -0.2822265329, south: -0.6572289225, east: -1.8324057205, west: -2.2656484906 },
  BBox { north: -0.2629042004, south: -0.6486323563, east: -1.0384116707, west: -1.4460314278 },
  BBox { north: -0.2880831316, south: -0.6919062952, east: -2.4929535609, west: -2.9778689605 },
  BBox { north: -0.2914867316, south: -0.7035905102, east: -1.4271818348, west: -1.8571591695 },
  BBox { north: -0.3301247841, south: -0.7151584032, east:  2.4931128920, west:  2.0590953724 },
  BBox { north: -0.3874201828, south: -0.7886139094, east: -2.9104357760, west:  2.9155977430 },
  BBox { north: -0.3994355536, south: -0.7582277983, east:  0.8009928728, west:  0.3203189154 },
  BBox { north: -0.3839680061, south: -0.8161207968, east:  2.9254488647, west:  2.4373911564 },
  BBox { north: -0.4015081955, south: -0.8059933041, east:  0.0774170600, west: -0.4407996455 },
  BBox { north: -0.5217310172, south: -0.8257056923, east: -0.8323758387, west: -1.2096072351 },
  BBox { north: -0.4878126487, south: -0.8923563816, east: -0.3772896322, west: -0.8416954863 },
  BBox { north: -0.5077056699, south: -0.8688134323, east: -2.1092246984, west: -2.6381198131 },
  BBox { north: -0.5274296369, south: -0.8861124342, east:  2.1837731904, west:  1.6653029906 },
  BBox { north: -0.5000895274, south: -0.8753613619, east:  1.2172365179, west:  0.7251792214 },
  BBox { north: -0.5518649171, south: -0.9637455176, east:  1.7118254405, west:  1.1730706283 },
  BBox { north: -0.5867983655, south: -0.9810602317, east: -1.1132949912, west: -1.6282489036 },
  BBox { north: -0.6107606351, south: -0.9808143411, east:  0.4705862876, west: -0.0764280232 },
  BBox { north: -0.5882763671, south: -1.0178603754, east: -1.6096654352, west: -2.2048658282 },
  BBox { north: -0.6549123281, south: -1.0192992459, east: -2.5112369109, west: -3.1062223524 },
  BBox { north: -0.7235635880, south: -1.0327022872, east:  0.8916912664, west:  0.3964904444 },
  BBox { north: -0.6760394879, south: -1.0704247274, east:  2.6617506252, west:  2.0385310576 },
  BBox { north: -0.7133009364, south: -1.1012164351, east: -3.0451868343, west:  2.6200475087 },
  BBox { north: -0.7664142870, south: -1.1552844504, east:  0.0742075819, west: -0.6051315508 },
  BBox { north: -0.7898245536, south: -1.1554653090, east: -0.6049985309, west: -1.2845013188 },
  BBox { north: -0.8379533102, south: -1.2107583139, east:  1.4213638958, west:  0.7036540363 },
  BBox { north: -0.8617060089, south: -1.2111467383, east: -1.9502950772, west: -2.7038165634 },
  BBox { north: -0.8429122839, south: -1.2602098384, east:  2.2418739770, west:  1.3819190605 },
  BBox { north: -0.9427181535, south: -1.3289908604, east:  0.8428397578, west: -0.1245925729 },
  BBox { north: -0.9189892073, south: -1.3292958655, east: -1.0853692039, west: -2.0534611106 },
  BBox { north: -0.9722665251, south: -1.2795047784, east: -2.5860320035, west:  2.9592934054 },
  BBox { north: -1.0128514567, south: -1.4184530251, east: -3.1359096806, west:  1.9738888575 },
  BBox { north: -1.0906938727, south: -1.5248015831, east:  0.2887321209, west: -1.4984857630 },
  BBox { north: -1.1787242424, south: -1.5248015831, east:  2.5349438173, west: -0.6011228503 },
  BBox { north: -1.2030547180, south: -1.5248015831, east: -0.6011228503, west:  2.5349438173 },
];
