//! Shortest path recovery from a computed distance field.

use maze_wave_core::{CellCoord, Direction, MazeError};

use crate::{topology::Topology, wave::DistanceField};

/// Walks the distance gradient from `end` back to `start`.
///
/// The field stores distances that decrease by exactly one along every
/// shortest path, so following the first descending neighbour in canonical
/// direction order recovers a route without re-running the search. The result
/// is written to `out` in start-to-end order; the return value counts the
/// neighbour probes performed.
pub(crate) fn trace(
    topology: Topology<'_>,
    field: &DistanceField,
    start: CellCoord,
    end: CellCoord,
    out: &mut Vec<CellCoord>,
) -> Result<u64, MazeError> {
    out.clear();

    let mut current = end;
    let mut current_distance = field.distance(end).ok_or(MazeError::NoPathExists)?;
    let mut probes = 0_u64;

    loop {
        out.push(current);

        if current_distance == 0 {
            if current != start {
                out.clear();
                return Err(MazeError::PathReconstructionInconsistent { cell: current });
            }
            break;
        }

        let expected = current_distance - 1;
        let mut next = None;

        for direction in Direction::ALL {
            probes += 1;
            let Some(neighbor) = current.neighbor(direction, topology.dimensions()) else {
                continue;
            };

            if field.distance(neighbor) == Some(expected) && topology.can_step(current, neighbor) {
                next = Some(neighbor);
                break;
            }
        }

        let Some(next) = next else {
            out.clear();
            return Err(MazeError::PathReconstructionInconsistent { cell: current });
        };

        current = next;
        current_distance = expected;
    }

    out.reverse();
    Ok(probes)
}
