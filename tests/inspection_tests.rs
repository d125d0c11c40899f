use hexcell::*;

#[test]
fn test_resolution_and_base_cell() {
  let cell = CellIndex(0x85283473fffffff);
  assert_eq!(index::get_resolution(cell), 5);
  assert_eq!(get_base_cell_number(cell), 20);
}

#[test]
fn test_is_pentagon() {
  assert!(!is_pentagon(CellIndex(0x85283473fffffff)));
  assert!(is_pentagon(CellIndex(0x8009fffffffffff)));
  assert!(!is_pentagon(NULL_INDEX));
}

#[test]
fn test_is_res_class_iii() {
  // Odd resolutions are class III.
  assert!(is_res_class_iii(CellIndex(0x85283473fffffff)));
  assert!(!is_res_class_iii(CellIndex(0x8428347ffffffff)));
}

#[test]
fn test_is_valid_cell() {
  assert!(is_valid_cell(CellIndex(0x85283473fffffff)));
  // Mode 0 is not a cell.
  assert!(!is_valid_cell(CellIndex(0x05283473fffffff)));
  // Digits past the resolution must stay unset.
  assert!(!is_valid_cell(CellIndex(0x8528347300fffff)));
  assert!(!is_valid_cell(NULL_INDEX));
}

#[test]
fn test_get_num_cells() {
  assert_eq!(get_num_cells(0), Ok(122));
  // Every refinement multiplies hexagon count by 7 but keeps the twelve
  // pentagons.
  for res in 0..15 {
    let coarse = get_num_cells(res).unwrap();
    let fine = get_num_cells(res + 1).unwrap();
    assert_eq!(fine, (coarse - 12) * 7 + 12 * 6, "res {res}");
  }
  assert_eq!(get_num_cells(15), Ok(569_707_381_193_162));
  assert_eq!(get_num_cells(16), Err(GridError::ResDomain));
  assert_eq!(get_num_cells(-1), Err(GridError::ResDomain));
}

#[test]
fn test_get_res0_cells() {
  let mut cells = [NULL_INDEX; 122];
  get_res0_cells(&mut cells);
  for (i, &cell) in cells.iter().enumerate() {
    assert!(is_valid_cell(cell));
    assert_eq!(index::get_resolution(cell), 0);
    assert_eq!(get_base_cell_number(cell), i as i32);
  }
}

#[test]
fn test_get_pentagons() {
  assert_eq!(pentagon_count(), 12);
  for res in 0..=15 {
    let mut pentagons = [NULL_INDEX; 12];
    get_pentagons(res, &mut pentagons).unwrap();
    for &pentagon in &pentagons {
      assert!(is_valid_cell(pentagon));
      assert!(is_pentagon(pentagon));
      assert_eq!(index::get_resolution(pentagon), res);
    }
  }

  let mut pentagons = [NULL_INDEX; 12];
  assert_eq!(get_pentagons(16, &mut pentagons), Err(GridError::ResDomain));
}

#[test]
fn test_icosahedron_faces() {
  let hexagon = CellIndex(0x85283473fffffff);
  assert_eq!(max_face_count(hexagon), 2);
  let mut faces = [-1; 2];
  let count = get_icosahedron_faces(hexagon, &mut faces).unwrap();
  assert!(count >= 1);
  for &face in &faces[..count] {
    assert!((0..20).contains(&face));
  }

  // A res 0 pentagon touches five faces.
  let pentagon = CellIndex(0x8009fffffffffff);
  assert_eq!(max_face_count(pentagon), 5);
  let mut faces = [-1; 5];
  assert_eq!(get_icosahedron_faces(pentagon, &mut faces), Ok(5));
}
