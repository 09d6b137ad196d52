//! Spatial hash collision detection
//!
//! The detector buckets world-space shapes into a [`SpatialHashGrid`] once
//! per fixed step and tests each shape only against the shapes already
//! bucketed into the cells it touches. Pairs are deduplicated through the
//! current step's pair set, so a pair sharing several cells is reported once.
//!
//! The previous step's pair set is kept alongside the current one. It drives
//! the on-enter reporting mode and the entered/exited queries.

use super::collision::WorldSpaceShape;
use super::collision_layers::CollisionLayers;
use crate::config::{CollisionConfig, ReportingMode};
use crate::ecs::Entity;
use crate::foundation::math::Rect;
use crate::spatial::SpatialHashGrid;
use std::collections::HashSet;

/// Errors raised by collision detector configuration
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CollisionError {
    /// Bounding box has zero, negative or non-finite extent
    #[error("invalid collision bounding box {0:?}: size must be positive and finite")]
    InvalidBoundingBox(Rect),

    /// Grid has no cells along one axis
    #[error("invalid collision grid {columns}x{rows}: both dimensions must be at least 1")]
    InvalidGridResolution {
        /// Requested columns
        columns: u32,
        /// Requested rows
        rows: u32,
    },
}

/// An unordered pair of colliding entities
///
/// The entity with the smaller id is always stored first, so
/// `Collision::new(a, b) == Collision::new(b, a)` and both hash identically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Collision {
    entity_a: Entity,
    entity_b: Entity,
}

impl Collision {
    /// Create a new collision pair (always stores smaller entity ID first for consistency)
    pub fn new(entity_a: Entity, entity_b: Entity) -> Self {
        if entity_a.id() <= entity_b.id() {
            Self { entity_a, entity_b }
        } else {
            Self {
                entity_a: entity_b,
                entity_b: entity_a,
            }
        }
    }

    /// Entity with the smaller id
    pub fn entity_a(&self) -> &Entity {
        &self.entity_a
    }

    /// Entity with the larger id
    pub fn entity_b(&self) -> &Entity {
        &self.entity_b
    }

    /// Whether `entity` is part of this pair
    pub fn involves(&self, entity: &Entity) -> bool {
        self.entity_a == *entity || self.entity_b == *entity
    }

    /// The partner of `entity` in this pair
    pub fn other(&self, entity: &Entity) -> Option<&Entity> {
        if self.entity_a == *entity {
            Some(&self.entity_b)
        } else if self.entity_b == *entity {
            Some(&self.entity_a)
        } else {
            None
        }
    }
}

/// A shape submitted to the detector for one step
#[derive(Debug, Clone)]
pub struct CollisionBody {
    /// Owning entity
    pub entity: Entity,
    /// Resolved world-space shape
    pub shape: WorldSpaceShape,
    /// Layers this body sits on
    pub layer: CollisionLayers,
    /// Layers this body accepts collisions from
    pub mask: CollisionLayers,
}

/// Broad-phase detector over a uniform grid
#[derive(Debug)]
pub struct SpatialHashDetector {
    config: CollisionConfig,
    grid: SpatialHashGrid<usize>,
    current_pairs: HashSet<Collision>,
    previous_pairs: HashSet<Collision>,
}

impl SpatialHashDetector {
    /// Build a detector; fails if the configured grid is invalid
    pub fn new(config: CollisionConfig) -> Result<Self, CollisionError> {
        let grid = SpatialHashGrid::new(config.bounding_box, config.columns, config.rows)?;
        Ok(Self {
            config,
            grid,
            current_pairs: HashSet::new(),
            previous_pairs: HashSet::new(),
        })
    }

    /// Active configuration
    pub fn config(&self) -> &CollisionConfig {
        &self.config
    }

    /// The grid as bucketed by the last step
    pub fn grid(&self) -> &SpatialHashGrid<usize> {
        &self.grid
    }

    /// Region covered by the grid
    pub fn bounding_box(&self) -> Rect {
        self.config.bounding_box
    }

    /// Move and resize the covered region, rebuilding the grid
    pub fn set_bounding_box(&mut self, bounding_box: Rect) -> Result<(), CollisionError> {
        self.rebuild(bounding_box, self.config.columns, self.config.rows)
    }

    /// Change the grid resolution, rebuilding the grid
    pub fn set_grid_resolution(&mut self, columns: u32, rows: u32) -> Result<(), CollisionError> {
        self.rebuild(self.config.bounding_box, columns, rows)
    }

    /// Current reporting mode
    pub fn reporting_mode(&self) -> ReportingMode {
        self.config.reporting
    }

    /// Switch between continuous and on-enter reporting
    pub fn set_reporting_mode(&mut self, mode: ReportingMode) {
        self.config.reporting = mode;
    }

    /// Pairs overlapping as of the last step
    pub fn current_collisions(&self) -> &HashSet<Collision> {
        &self.current_pairs
    }

    /// Pairs overlapping in the last step but not the one before, ordered
    pub fn collisions_entered(&self) -> Vec<Collision> {
        let mut entered: Vec<_> = self
            .current_pairs
            .difference(&self.previous_pairs)
            .cloned()
            .collect();
        entered.sort();
        entered
    }

    /// Pairs overlapping in the step before the last but not the last, ordered
    pub fn collisions_exited(&self) -> Vec<Collision> {
        let mut exited: Vec<_> = self
            .previous_pairs
            .difference(&self.current_pairs)
            .cloned()
            .collect();
        exited.sort();
        exited
    }

    /// Run one detection step over `bodies`, in order
    ///
    /// Returns the pairs to report for this step, in discovery order. In
    /// continuous mode that is every overlapping pair; in on-enter mode only
    /// pairs that were not overlapping in the previous step.
    pub fn step(&mut self, bodies: &[CollisionBody]) -> Vec<Collision> {
        std::mem::swap(&mut self.current_pairs, &mut self.previous_pairs);
        self.current_pairs.clear();
        self.grid.clear();

        let Self {
            config,
            grid,
            current_pairs,
            previous_pairs,
        } = self;

        let mut reported = Vec::new();
        for (index, body) in bodies.iter().enumerate() {
            if !body.shape.is_testable() {
                continue;
            }
            let Some(bounds) = body.shape.bounds() else {
                continue;
            };

            let cells: Vec<usize> = grid
                .candidate_cells(&bounds)
                .into_iter()
                .filter(|&cell| {
                    grid.cell(cell)
                        .is_some_and(|cell| body.shape.overlaps_rect(cell.bounds()))
                })
                .collect();

            for &cell in &cells {
                let residents = grid.cell(cell).map(|cell| cell.members()).unwrap_or_default();
                for &resident in residents {
                    let other = &bodies[resident];
                    if !CollisionLayers::should_collide(body.layer, body.mask, other.layer, other.mask) {
                        continue;
                    }
                    if !body.shape.overlaps(&other.shape) {
                        continue;
                    }

                    let collision = Collision::new(body.entity.clone(), other.entity.clone());
                    if current_pairs.insert(collision.clone()) {
                        let report = match config.reporting {
                            ReportingMode::Continuous => true,
                            ReportingMode::OnEnter => !previous_pairs.contains(&collision),
                        };
                        if report {
                            log::trace!(
                                "Collision between {:?} and {:?}",
                                collision.entity_a().id(),
                                collision.entity_b().id()
                            );
                            reported.push(collision);
                        }
                    }
                }
            }

            for cell in cells {
                grid.insert(cell, index);
            }
        }

        reported
    }

    fn rebuild(&mut self, bounding_box: Rect, columns: u32, rows: u32) -> Result<(), CollisionError> {
        let grid = SpatialHashGrid::new(bounding_box, columns, rows)?;
        log::debug!(
            "Rebuilt collision grid: {}x{} cells over {:?}",
            columns,
            rows,
            bounding_box
        );
        self.grid = grid;
        self.config.bounding_box = bounding_box;
        self.config.columns = columns;
        self.config.rows = rows;
        Ok(())
    }
}
