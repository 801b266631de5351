//! Annotation layer registry

use crate::core::database::{DrawingDatabase, DrawingError};
use crate::core::identity::Handle;
use crate::entities::LayerRecord;

/// Return the handle of layer `name`, creating the layer if it does not exist
///
/// An existing layer is returned untouched. Calling this any number of times
/// leaves exactly one layer with the name.
pub fn ensure_layer<D: DrawingDatabase + ?Sized>(
    db: &mut D,
    name: &str,
) -> Result<(Handle, bool), DrawingError> {
    if let Some(handle) = db.find_layer(name) {
        return Ok((handle, false));
    }
    let handle = db.add_layer(LayerRecord::new(name))?;
    Ok((handle, true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::drawing::Drawing;

    #[test]
    fn test_creates_missing_layer() {
        let mut drawing = Drawing::new("");
        let (handle, created) = ensure_layer(&mut drawing, "Balloons").unwrap();
        assert!(created);
        assert_eq!(drawing.find_layer("Balloons"), Some(handle));
    }

    #[test]
    fn test_existing_layer_is_returned_unchanged() {
        let mut drawing = Drawing::new("");
        let mut record = LayerRecord::new("Balloons");
        record.color = 1;
        let existing = drawing.add_layer(record).unwrap();

        let (handle, created) = ensure_layer(&mut drawing, "Balloons").unwrap();
        assert!(!created);
        assert_eq!(handle, existing);
        let layer = drawing.layers().iter().find(|l| l.name == "Balloons").unwrap();
        assert_eq!(layer.color, 1);
    }

    #[test]
    fn test_repeated_calls_never_duplicate() {
        let mut drawing = Drawing::new("");
        let (first, _) = ensure_layer(&mut drawing, "Balloons").unwrap();
        for _ in 0..3 {
            let (again, created) = ensure_layer(&mut drawing, "Balloons").unwrap();
            assert!(!created);
            assert_eq!(again, first);
        }
        let count = drawing.layers().iter().filter(|l| l.name == "Balloons").count();
        assert_eq!(count, 1);
    }
}
