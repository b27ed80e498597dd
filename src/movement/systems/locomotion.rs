//! Movement domain: avian2d adapters and the fixed-tick locomotion system.

use avian2d::prelude::*;
use bevy::ecs::message::MessageWriter;
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::combat::PlayerDiedEvent;
use crate::core::SceneReloadRequested;
use crate::movement::components::{CourseEntity, GrappleAnchor, Player, RopeJoint};
use crate::movement::controller::PlayerLocomotionController;
use crate::movement::events::{
    FellEvent, GrappleEngagedEvent, GrappleReleasedEvent, LandedEvent,
};
use crate::movement::physics::{AnchorId, AnchorSet, BodyHandle, PhysicsBody, PhysicsWorld};
use crate::movement::resources::{MovementInput, MovementTuning};
use crate::movement::signals::{AnimationSignals, LocomotionEvent};

/// Grapple anchors registered when the course is built, indexed by `AnchorId`.
#[derive(Resource, Debug, Default)]
pub struct AnchorRegistry {
    entities: Vec<Entity>,
}

impl AnchorRegistry {
    pub fn register(&mut self, entity: Entity) -> AnchorId {
        self.entities.push(entity);
        AnchorId(self.entities.len() as u32 - 1)
    }

    pub fn clear(&mut self) {
        self.entities.clear();
    }

    pub fn entity(&self, anchor: AnchorId) -> Option<Entity> {
        self.entities.get(anchor.0 as usize).copied()
    }

    pub fn anchor_set(&self) -> AnchorSet {
        AnchorSet::new((0..self.entities.len() as u32).map(AnchorId))
    }
}

/// Joint changes requested during a tick, applied in order afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum JointRequest {
    Engage { anchor: AnchorId, distance: f32 },
    Release,
}

/// The player's rigid body as seen by the controller.
pub(crate) struct AvianBody<'a> {
    pub handle: BodyHandle,
    pub position: Vec2,
    pub velocity: &'a mut Vec2,
    pub inverse_mass: f32,
    pub dt: f32,
    pub joint_requests: &'a mut Vec<JointRequest>,
}

impl PhysicsBody for AvianBody<'_> {
    fn handle(&self) -> BodyHandle {
        self.handle
    }

    fn position(&self) -> Vec2 {
        self.position
    }

    fn velocity(&self) -> Vec2 {
        *self.velocity
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        *self.velocity = velocity;
    }

    fn apply_impulse(&mut self, impulse: Vec2) {
        *self.velocity += impulse * self.inverse_mass;
    }

    fn apply_force(&mut self, force: Vec2) {
        *self.velocity += force * self.inverse_mass * self.dt;
    }

    fn enable_distance_constraint(&mut self, anchor: AnchorId, distance: f32) {
        self.joint_requests
            .push(JointRequest::Engage { anchor, distance });
    }

    fn disable_distance_constraint(&mut self) {
        self.joint_requests.push(JointRequest::Release);
    }
}

/// Spatial queries and anchor positions backing the controller's probes.
struct AvianWorld<'a, 'w, 's> {
    spatial_query: &'a SpatialQuery<'w, 's>,
    registry: &'a AnchorRegistry,
    anchors: &'a Query<'w, 's, &'static Position, With<GrappleAnchor>>,
}

impl PhysicsWorld for AvianWorld<'_, '_, '_> {
    fn overlap_circle(&self, center: Vec2, radius: f32, mask: LayerMask) -> Vec<BodyHandle> {
        let filter = SpatialQueryFilter::from_mask(mask);
        self.spatial_query
            .shape_intersections(&Collider::circle(radius), center, 0.0, &filter)
            .into_iter()
            .map(BodyHandle::from)
            .collect()
    }

    fn anchor_position(&self, anchor: AnchorId) -> Option<Vec2> {
        let entity = self.registry.entity(anchor)?;
        self.anchors.get(entity).ok().map(|position| position.0)
    }
}

#[derive(SystemParam)]
pub(crate) struct LocomotionWriters<'w> {
    landed: MessageWriter<'w, LandedEvent>,
    fell: MessageWriter<'w, FellEvent>,
    grapple_engaged: MessageWriter<'w, GrappleEngagedEvent>,
    grapple_released: MessageWriter<'w, GrappleReleasedEvent>,
    died: MessageWriter<'w, PlayerDiedEvent>,
    reload: MessageWriter<'w, SceneReloadRequested>,
}

impl LocomotionWriters<'_> {
    fn forward(&mut self, events: Vec<LocomotionEvent>, registry: &AnchorRegistry) {
        for event in events {
            match event {
                LocomotionEvent::Landed => {
                    self.landed.write(LandedEvent);
                }
                LocomotionEvent::Fell => {
                    self.fell.write(FellEvent);
                }
                LocomotionEvent::GrappleEngaged {
                    anchor,
                    anchor_position,
                } => {
                    let Some(anchor) = registry.entity(anchor) else {
                        warn!("Grapple engaged on unregistered anchor {:?}", anchor);
                        continue;
                    };
                    self.grapple_engaged.write(GrappleEngagedEvent {
                        anchor,
                        anchor_position,
                    });
                }
                LocomotionEvent::GrappleReleased => {
                    self.grapple_released.write(GrappleReleasedEvent);
                }
                LocomotionEvent::Died => {
                    self.died.write(PlayerDiedEvent);
                }
                LocomotionEvent::SceneReloadRequested => {
                    self.reload.write(SceneReloadRequested);
                }
                _ => {}
            }
        }
    }
}

/// Spawns or despawns the rope joint to match what the controller asked for.
pub(crate) fn apply_joint_requests(
    commands: &mut Commands,
    player: Entity,
    requests: &[JointRequest],
    registry: &AnchorRegistry,
    rope: &mut RopeJoint,
) {
    for request in requests {
        if let Some(joint) = rope.0.take() {
            commands.entity(joint).despawn();
        }
        if let JointRequest::Engage { anchor, distance } = *request {
            let Some(anchor_entity) = registry.entity(anchor) else {
                warn!("Grapple anchor {:?} is not registered", anchor);
                continue;
            };
            let joint = commands
                .spawn((
                    CourseEntity,
                    DistanceJoint::new(anchor_entity, player).with_limits(distance, distance),
                ))
                .id();
            rope.0 = Some(joint);
        }
    }
}

pub(crate) fn run_locomotion(
    mut commands: Commands,
    time: Res<Time>,
    tuning: Res<MovementTuning>,
    mut input: ResMut<MovementInput>,
    spatial_query: SpatialQuery,
    registry: Res<AnchorRegistry>,
    anchors: Query<&'static Position, With<GrappleAnchor>>,
    mut players: Query<
        (
            Entity,
            &Position,
            &mut LinearVelocity,
            &mut PlayerLocomotionController,
            &mut RopeJoint,
            &mut AnimationSignals,
        ),
        With<Player>,
    >,
    mut writers: LocomotionWriters,
) {
    let dt = time.delta_secs();
    let world = AvianWorld {
        spatial_query: &spatial_query,
        registry: &registry,
        anchors: &anchors,
    };

    for (entity, position, mut velocity, mut controller, mut rope, mut signals) in &mut players {
        let mut joint_requests = Vec::new();
        let mut body = AvianBody {
            handle: entity.into(),
            position: position.0,
            velocity: &mut velocity.0,
            inverse_mass: tuning.body_mass.recip(),
            dt,
            joint_requests: &mut joint_requests,
        };
        controller.tick(&input, &mut body, &world, dt);

        apply_joint_requests(&mut commands, entity, &joint_requests, &registry, &mut rope);
        if *signals != *controller.signals() {
            *signals = controller.signals().clone();
        }
        writers.forward(controller.drain_events(), &registry);
    }

    input.clear_edges();
}
