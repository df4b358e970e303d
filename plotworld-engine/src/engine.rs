//! The access rule engine: intercepts world-mutating actions and decides
//! whether they may proceed.
//!
//! Every entry point is a pure decision over the action, the grid
//! classification and the plot/permission state, plus the side effects of
//! dispatching a cancellable notification and logging. Denial is always
//! expressed by cancelling the originating action; nothing here throws into
//! the host's event loop.

use std::sync::Arc;

use flexstr::SharedStr;
use glam::I64Vec3;
use log::{debug, warn};
use plotworld_core::{BlockId, Plot, PlotId};

use crate::events::{EventBus, EventObserver, PlotEvent};
use crate::permission::{Permission, PermissionChecker};
use crate::resolver::PlotResolver;
use crate::settings::PlotLevelSettings;

/// A sapling variety, classified by how far the leaves of the grown tree
/// reach sideways.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sapling {
    /// grows the wide crown
    Spruce,
    /// every other variety
    Common,
}

impl Sapling {
    /// Maximum lateral leaf spread of the grown tree.
    #[must_use]
    pub const fn leaf_spread(self) -> i64 {
        match self {
            Self::Spruce => 3,
            Self::Common => 2,
        }
    }
}

/// The ways a player can try to change a block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MutationKind {
    /// placing a block
    Place,
    /// breaking a block
    Break,
    /// clicking a block; carries the sapling variety when the click would
    /// grow a tree
    Interact {
        /// present when the interaction grows a sapling
        sapling: Option<Sapling>,
    },
    /// editing the text of a sign
    SignEdit,
}

impl MutationKind {
    const fn sapling(self) -> Option<Sapling> {
        match self {
            Self::Interact { sapling } => sapling,
            _ => None,
        }
    }

    const fn as_str(self) -> &'static str {
        match self {
            Self::Place => "block placement",
            Self::Break => "block break",
            Self::Interact { .. } => "block interaction",
            Self::SignEdit => "sign edit",
        }
    }
}

/// One intercepted attempt to change a block, however the host labels it.
#[derive(Clone, Debug, PartialEq)]
pub struct MutationAttempt {
    /// what the actor is trying to do
    pub kind: MutationKind,
    /// position of the affected block
    pub position: I64Vec3,
    /// name of the acting player
    pub actor: SharedStr,
    /// whether something upstream already cancelled the action
    pub pre_cancelled: bool,
}

/// The engine's verdict on an intercepted action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    /// apply the action
    Allow,
    /// mark the action as not-to-be-applied
    Cancel,
}

impl Decision {
    const fn from_cancelled(cancelled: bool) -> Self {
        if cancelled { Self::Cancel } else { Self::Allow }
    }

    /// Returns whether the action ends up cancelled.
    #[must_use]
    pub const fn is_cancelled(self) -> bool {
        matches!(self, Self::Cancel)
    }
}

/// The verdict on an explosion, together with the surviving affected blocks.
#[derive(Clone, Debug, PartialEq)]
pub struct ExplosionOutcome {
    /// whether the explosion happens at all
    pub decision: Decision,
    /// the affected blocks left after dropping everything outside the
    /// origin plot's bounding box
    pub blocks: Vec<I64Vec3>,
}

/// The verdict on a movement or teleport.
#[derive(Clone, Debug, PartialEq)]
pub struct MoveOutcome {
    /// whether the movement may happen
    pub decision: Decision,
    /// status popup to show the mover, when one is due
    pub popup: Option<String>,
    /// plot the host's teleporter should return the mover to; used instead
    /// of a plain cancellation where the platform cannot reliably cancel a
    /// movement mid-flight
    pub send_back_to: Option<PlotId>,
}

impl MoveOutcome {
    /// A movement this engine has no opinion about; the upstream cancellation
    /// state passes through untouched.
    const fn pass(pre_cancelled: bool) -> Self {
        Self {
            decision: Decision::from_cancelled(pre_cancelled),
            popup: None,
            send_back_to: None,
        }
    }
}

/// Why an attack was stopped; the host renders the matching message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PvpDenial {
    /// the victim's plot does not allow pvp
    PlotPvpDisabled,
    /// the world restricts pvp outside plots
    WorldPvpRestricted,
}

/// The verdict on an attack between two players.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PvpOutcome {
    /// whether the damage applies
    pub decision: Decision,
    /// set when the attacker should be told why the hit was stopped
    pub denial: Option<PvpDenial>,
}

impl PvpOutcome {
    const fn allowed() -> Self {
        Self {
            decision: Decision::Allow,
            denial: None,
        }
    }
}

/// The result of a plot fill request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FillOutcome {
    /// the store accepted the fill
    Accepted,
    /// the actor may not use the fill operation at all
    MissingPermission,
    /// the actor does not stand inside a plot
    NotInPlot,
    /// the actor neither owns the plot nor holds the admin fill permission
    NotOwner,
    /// plots cannot be filled with air
    InvalidBlock,
    /// the store rejected or failed the fill
    Failed,
}

/// Evaluates every intercepted action for one world.
///
/// All collaborators are injected: the resolver carries the world's grid and
/// plot store, the permission checker answers for the host's permission
/// system, and observers on the event bus may veto or un-veto decisions.
pub struct AccessRuleEngine {
    settings: Arc<PlotLevelSettings>,
    resolver: PlotResolver,
    permissions: Box<dyn PermissionChecker>,
    events: EventBus,
}

impl AccessRuleEngine {
    /// Creates the engine for one world.
    #[must_use]
    pub fn new(
        settings: Arc<PlotLevelSettings>,
        resolver: PlotResolver,
        permissions: Box<dyn PermissionChecker>,
    ) -> Self {
        Self {
            settings,
            resolver,
            permissions,
            events: EventBus::new(),
        }
    }

    /// Registers an observer for this engine's notifications.
    pub fn subscribe(&mut self, observer: Box<dyn EventObserver>) {
        self.events.subscribe(observer);
    }

    /// Gate for block placement, breaking, interaction and sign edits.
    ///
    /// Inside a plot the decision follows ownership (owner, helpers, the
    /// wildcard helper, or the admin build permission), after observers had
    /// their say through a block notification. In road/wall space only road
    /// admins build freely; everybody else is limited to bordering blocks of
    /// their own plots, and only where the world enables border editing.
    ///
    /// Growing a sapling is re-checked against the plot's inner edge even for
    /// the owner, so no grown crown can reach across the wall.
    pub fn handle_block_mutation(&mut self, attempt: &MutationAttempt) -> Decision {
        let position = attempt.position;
        let actor = &attempt.actor;

        if let Some(plot) = self.resolver.plot_at_position(position.x, position.z) {
            let cancelled = self.events.dispatch(
                PlotEvent::Block {
                    plot: plot.clone(),
                    position,
                    actor: actor.clone(),
                },
                attempt.pre_cancelled,
            );
            if self.may_build(&plot, actor) {
                match attempt.kind.sapling() {
                    None => return Decision::from_cancelled(cancelled),
                    Some(sapling) => {
                        if !self.sapling_overhangs(&plot, sapling, position) {
                            return Decision::from_cancelled(cancelled);
                        }
                        // the crown would reach past the wall; fall through
                    }
                }
            }
        } else if self.has(actor, Permission::AdminBuildRoad) {
            return Decision::from_cancelled(attempt.pre_cancelled);
        } else if self.settings.edit_border_blocks {
            if let Some(plot) = self
                .resolver
                .plot_bordering_position(position.x, position.z)
            {
                let cancelled = self.events.dispatch(
                    PlotEvent::BorderChange {
                        plot: plot.clone(),
                        position,
                        actor: actor.clone(),
                    },
                    attempt.pre_cancelled,
                );
                if self.may_build(&plot, actor) && attempt.kind.sapling().is_none() {
                    return Decision::from_cancelled(cancelled);
                }
            }
        }

        debug!(
            "cancelled {kind} by '{actor}' at ({x}, {y}, {z})",
            kind = attempt.kind.as_str(),
            x = position.x,
            y = position.y,
            z = position.z,
        );
        Decision::Cancel
    }

    /// Filter for explosions.
    ///
    /// An explosion without a plot context is cancelled outright. Inside a
    /// plot the blast proceeds, but every affected block outside the plot's
    /// bounding box is dropped from the effect list rather than individually
    /// cancelled.
    pub fn filter_explosion(&self, origin: I64Vec3, mut blocks: Vec<I64Vec3>) -> ExplosionOutcome {
        let Some(plot) = self.resolver.plot_at_position(origin.x, origin.z) else {
            debug!(
                "cancelled explosion outside any plot on '{world}'",
                world = self.settings.name
            );
            return ExplosionOutcome {
                decision: Decision::Cancel,
                blocks: Vec::new(),
            };
        };
        let bounds = self.resolver.grid().plot_bounds(plot.id);
        blocks.retain(|block| bounds.contains_column(block.x, block.z));
        ExplosionOutcome {
            decision: Decision::Allow,
            blocks,
        }
    }

    /// Filter for entity motion: worlds may freeze everything that is not a
    /// player.
    pub fn handle_entity_motion(&self, is_player: bool) -> Decision {
        if self.settings.restrict_entity_movement && !is_player {
            debug!(
                "cancelled entity motion on '{world}'",
                world = self.settings.name
            );
            return Decision::Cancel;
        }
        Decision::Allow
    }

    /// Filter for liquid/fire/growth propagation from `source` to
    /// `destination`.
    ///
    /// Liquids touching plot territory only flow when the world lets plot
    /// liquids update at all, and even then never across a plot boundary.
    /// Other spread is confined to its own plot unless the world allows
    /// outside spread.
    pub fn handle_block_spread(
        &self,
        source: I64Vec3,
        destination: I64Vec3,
        liquid: bool,
    ) -> Decision {
        let source_plot = self.resolver.plot_at_position(source.x, source.z);
        let destination_plot = self
            .resolver
            .plot_at_position(destination.x, destination.z);
        let same_plot = match (&source_plot, &destination_plot) {
            (Some(source_plot), Some(destination_plot)) => source_plot.same_as(destination_plot),
            _ => false,
        };

        if liquid {
            let touches_plot = source_plot.is_some()
                || destination_plot.is_some()
                || self.resolver.is_position_bordering_plot(source.x, source.z)
                || self
                    .resolver
                    .is_position_bordering_plot(destination.x, destination.z);
            if touches_plot && (!self.settings.update_plot_liquids || !same_plot) {
                debug!(
                    "cancelled liquid spread on '{world}'",
                    world = self.settings.name
                );
                return Decision::Cancel;
            }
        } else if !self.settings.allow_outside_plot_spread && !same_plot {
            return Decision::Cancel;
        }
        Decision::Allow
    }

    /// The enter/leave state machine for movements and teleports.
    ///
    /// Crossing into a plot raises an enter notification and, when allowed,
    /// produces the status popup. Crossing out raises a leave notification.
    /// Both are suppressed for the reserved origin plot. Movement inside a
    /// plot that denies the mover yields a bounce-back request instead of a
    /// cancellation, because movements are not reliably cancellable
    /// mid-flight on every platform.
    pub fn handle_move(
        &mut self,
        player: &str,
        from: I64Vec3,
        to: I64Vec3,
        pre_cancelled: bool,
    ) -> MoveOutcome {
        let to_plot = self.resolver.plot_at_position(to.x, to.z);
        let from_plot = self.resolver.plot_at_position(from.x, from.z);

        match (to_plot, from_plot) {
            (Some(to_plot), from_plot)
                if from_plot
                    .as_ref()
                    .is_none_or(|from_plot| !to_plot.same_as(from_plot)) =>
            {
                self.enter_plot(player, &to_plot, pre_cancelled)
            }
            (to_plot, Some(from_plot))
                if to_plot
                    .as_ref()
                    .is_none_or(|to_plot| !to_plot.same_as(&from_plot)) =>
            {
                self.leave_plot(player, &from_plot, pre_cancelled)
            }
            (Some(to_plot), Some(from_plot)) => {
                if !to_plot.is_owner(player)
                    && to_plot.is_denied(player)
                    && !self.has(player, Permission::AdminDenyBypass)
                {
                    debug!(
                        "sending '{player}' back out of plot {id}",
                        id = to_plot.id
                    );
                    MoveOutcome {
                        decision: Decision::from_cancelled(pre_cancelled),
                        popup: None,
                        send_back_to: Some(from_plot.id),
                    }
                } else {
                    MoveOutcome::pass(pre_cancelled)
                }
            }
            _ => MoveOutcome::pass(pre_cancelled),
        }
    }

    /// Gate for damage between two players.
    ///
    /// Inside a plot the pvp notification defaults to cancelled unless the
    /// plot allows pvp or the attacker bypasses; outside plots the world's
    /// pvp restriction applies. A cancelled hit names the reason so the host
    /// can notify the attacker.
    pub fn handle_pvp(
        &mut self,
        attacker: &str,
        victim: &str,
        victim_position: I64Vec3,
        pre_cancelled: bool,
    ) -> PvpOutcome {
        if pre_cancelled {
            // somebody upstream already stopped the hit
            return PvpOutcome {
                decision: Decision::Cancel,
                denial: None,
            };
        }

        if let Some(plot) = self
            .resolver
            .plot_at_position(victim_position.x, victim_position.z)
        {
            let default_cancelled = !plot.pvp && !self.has(attacker, Permission::AdminPvpBypass);
            if default_cancelled {
                debug!(
                    "cancelled pvp event in plot {id} on '{world}'",
                    id = plot.id,
                    world = self.settings.name
                );
            }
            let cancelled = self.events.dispatch(
                PlotEvent::Pvp {
                    plot,
                    attacker: attacker.to_string().into(),
                    victim: victim.to_string().into(),
                },
                default_cancelled,
            );
            return PvpOutcome {
                decision: Decision::from_cancelled(cancelled),
                denial: cancelled.then_some(PvpDenial::PlotPvpDisabled),
            };
        }

        if self.has(attacker, Permission::AdminPvpBypass) {
            return PvpOutcome::allowed();
        }
        if self.settings.restrict_pvp {
            debug!(
                "cancelled pvp event on '{world}'",
                world = self.settings.name
            );
            return PvpOutcome {
                decision: Decision::Cancel,
                denial: Some(PvpDenial::WorldPvpRestricted),
            };
        }
        PvpOutcome::allowed()
    }

    /// The plot fill operation: refills the ground layer of the plot the
    /// actor stands in, rate-limited by the world settings.
    pub fn handle_fill(&mut self, actor: &str, position: I64Vec3, block: BlockId) -> FillOutcome {
        if !self.has(actor, Permission::CommandFill) {
            return FillOutcome::MissingPermission;
        }
        let Some(plot) = self.resolver.plot_at_position(position.x, position.z) else {
            return FillOutcome::NotInPlot;
        };
        if !plot.is_owner(actor) && !self.has(actor, Permission::AdminFill) {
            return FillOutcome::NotOwner;
        }
        if block.is_air() {
            return FillOutcome::InvalidBlock;
        }
        let limit = self.settings.fill_blocks_per_tick;
        match self.resolver.store_mut().fill_plot(&plot, block, limit) {
            Ok(true) => FillOutcome::Accepted,
            Ok(false) => FillOutcome::Failed,
            Err(error) => {
                warn!("plot fill of {id} failed: {error}", id = plot.id);
                FillOutcome::Failed
            }
        }
    }

    fn enter_plot(&mut self, player: &str, plot: &Plot, pre_cancelled: bool) -> MoveOutcome {
        if plot.reserved_origin {
            return MoveOutcome::pass(pre_cancelled);
        }
        let mut cancelled = self.events.dispatch(
            PlotEvent::EnterPlot {
                plot: plot.clone(),
                player: player.to_string().into(),
            },
            pre_cancelled,
        );
        // the deny list overrides whatever the observers decided
        if !plot.is_owner(player)
            && plot.is_denied(player)
            && !self.has(player, Permission::AdminDenyBypass)
        {
            cancelled = true;
        }
        if cancelled {
            return MoveOutcome {
                decision: Decision::Cancel,
                popup: None,
                send_back_to: None,
            };
        }
        let popup = self
            .settings
            .show_plot_popup
            .then(|| entry_popup(plot, player));
        MoveOutcome {
            decision: Decision::Allow,
            popup,
            send_back_to: None,
        }
    }

    fn leave_plot(&mut self, player: &str, plot: &Plot, pre_cancelled: bool) -> MoveOutcome {
        if plot.reserved_origin {
            return MoveOutcome::pass(pre_cancelled);
        }
        let cancelled = self.events.dispatch(
            PlotEvent::LeavePlot {
                plot: plot.clone(),
                player: player.to_string().into(),
            },
            pre_cancelled,
        );
        MoveOutcome {
            decision: Decision::from_cancelled(cancelled),
            popup: None,
            send_back_to: None,
        }
    }

    fn may_build(&self, plot: &Plot, actor: &str) -> bool {
        plot.is_owner(actor)
            || plot.is_helper(actor)
            || self.has(actor, Permission::AdminBuildPlot)
    }

    fn sapling_overhangs(&self, plot: &Plot, sapling: Sapling, position: I64Vec3) -> bool {
        let safe = self
            .resolver
            .grid()
            .plot_bounds(plot.id)
            .shrunk_by(sapling.leaf_spread());
        !safe.contains_column(position.x, position.z)
    }

    fn has(&self, actor: &str, permission: Permission) -> bool {
        self.permissions.has_permission(actor, permission)
    }
}

/// Builds the two-line status popup shown on entering a plot. The lines are
/// centered relative to each other by padding the shorter one with leading
/// spaces equal to half the character-length difference.
fn entry_popup(plot: &Plot, player: &str) -> String {
    let title = format!("Plot {id}", id = plot.id);
    let status = if plot.is_claimed() {
        if plot.price > 0.0 && !plot.is_owner(player) {
            format!(
                "{owner} is selling this plot for {price}",
                owner = plot.owner,
                price = plot.price
            )
        } else {
            format!("Owned by {owner}", owner = plot.owner)
        }
    } else {
        format!("Available for {price}", price = plot.price)
    };
    let [title, status] = center_pair(title, status);
    format!("{title}\n{status}")
}

fn center_pair(first: String, second: String) -> [String; 2] {
    let first_len = first.chars().count();
    let second_len = second.chars().count();
    if first_len >= second_len {
        let padding = (first_len - second_len) / 2;
        [first, pad(second, padding)]
    } else {
        // rounding away from zero mirrors the floor of the negative half
        let padding = (second_len - first_len + 1) / 2;
        [pad(first, padding), second]
    }
}

fn pad(line: String, padding: usize) -> String {
    let mut padded = " ".repeat(padding);
    padded.push_str(&line);
    padded
}
