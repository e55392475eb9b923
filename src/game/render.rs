//! Draw Pass
//!
//! Turns a [`World`] into an ordered list of draw requests for a host
//! render target. Pixels, textures and fonts belong to the host; the core
//! only decides what is drawn, where, and in which order.

use serde::{Serialize, Deserialize};

use crate::core::rect::Rect;
use crate::game::camera::Transform;
use crate::game::item::ItemKind;
use crate::game::level::TileKind;
use crate::game::projectile::ProjectileKind;
use crate::game::world::World;

/// Draw order. Later layers occlude earlier ones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum DrawLayer {
    Background = 0,
    Tiles = 1,
    Enemies = 2,
    Projectiles = 3,
    Items = 4,
    Player = 5,
    Debug = 6,
    /// Replaces everything else once the game is over
    GameOver = 7,
}

/// What a request depicts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sprite {
    Background,
    Tile(TileKind),
    Enemy,
    Projectile(ProjectileKind),
    Item(ItemKind),
    Player,
    /// Bounding box outline
    DebugBox,
    GameOverBanner,
}

/// A single draw call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawRequest {
    pub layer: DrawLayer,
    pub sprite: Sprite,
    /// Destination in world space (screen space for screen-fixed layers)
    pub rect: Rect,
    pub transform: Transform,
}

/// Host surface accepting draw calls.
pub trait RenderTarget {
    fn draw(&mut self, request: &DrawRequest);
}

/// Records requests instead of drawing them.
#[derive(Clone, Debug, Default)]
pub struct CommandBuffer {
    requests: Vec<DrawRequest>,
}

impl CommandBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requests(&self) -> &[DrawRequest] {
        &self.requests
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    pub fn clear(&mut self) {
        self.requests.clear();
    }

    /// Requests on one layer.
    pub fn layer(&self, layer: DrawLayer) -> impl Iterator<Item = &DrawRequest> + '_ {
        self.requests.iter().filter(move |r| r.layer == layer)
    }
}

impl RenderTarget for CommandBuffer {
    fn draw(&mut self, request: &DrawRequest) {
        self.requests.push(*request);
    }
}

/// Emit the whole frame to `target` in layer order.
///
/// Once the game is over only the banner is drawn.
pub fn draw_frame<T: RenderTarget + ?Sized>(world: &World, target: &mut T) {
    let viewport = world.camera.viewport();

    if world.is_game_over() {
        let screen = Rect::new(0, 0, viewport.width, viewport.height);
        target.draw(&screen_request(DrawLayer::GameOver, Sprite::GameOverBanner, screen));
        return;
    }

    let camera = world.camera.transform();
    let request = |layer, sprite, rect| DrawRequest { layer, sprite, rect, transform: camera };

    target.draw(&screen_request(
        DrawLayer::Background,
        Sprite::Background,
        Rect::new(0, 0, viewport.width, viewport.height),
    ));

    for tile in world.level.tiles().iter().filter(|t| t.rect.intersects(&viewport)) {
        target.draw(&request(DrawLayer::Tiles, Sprite::Tile(tile.kind), tile.rect));
    }

    for enemy in world.enemies.iter().filter(|e| e.unit.is_active()) {
        target.draw(&request(DrawLayer::Enemies, Sprite::Enemy, enemy.unit.body.bounding_box()));
    }

    for projectile in world.projectiles.iter().filter(|p| p.is_active()) {
        target.draw(&request(
            DrawLayer::Projectiles,
            Sprite::Projectile(projectile.kind),
            projectile.body.bounding_box(),
        ));
    }

    for item in world.items.iter().filter(|i| i.is_active()) {
        target.draw(&request(DrawLayer::Items, Sprite::Item(item.kind), item.body.bounding_box()));
    }

    let player_box = world.player.body.bounding_box();
    target.draw(&request(DrawLayer::Player, Sprite::Player, player_box));

    if world.debug_overlay {
        let boxes = world
            .enemies
            .iter()
            .filter(|e| e.unit.is_active())
            .map(|e| e.unit.body.bounding_box())
            .chain(std::iter::once(player_box));
        for bx in boxes {
            target.draw(&request(DrawLayer::Debug, Sprite::DebugBox, bx));
        }
    }
}

fn screen_request(layer: DrawLayer, sprite: Sprite, rect: Rect) -> DrawRequest {
    DrawRequest {
        layer,
        sprite,
        rect,
        transform: Transform::IDENTITY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::config::SimConfig;
    use crate::game::level::LevelLayout;
    use crate::game::world::{PLAYER_ID, WorldPhase};

    fn world() -> World {
        let loaded = LevelLayout {
            name: "stage".to_string(),
            tile_size: 40,
            rows: vec![
                "..........".to_string(),
                ".P.H..E...".to_string(),
                "####==####".to_string(),
            ],
        }
        .parse(128)
        .unwrap();
        World::new(loaded, SimConfig::default()).unwrap()
    }

    #[test]
    fn test_layers_in_order() {
        let mut world = world();
        world.fire(ProjectileKind::Standard, PLAYER_ID);
        world.debug_overlay = true;

        let mut buffer = CommandBuffer::new();
        draw_frame(&world, &mut buffer);

        let layers: Vec<_> = buffer.requests().iter().map(|r| r.layer).collect();
        let mut sorted = layers.clone();
        sorted.sort();
        assert_eq!(layers, sorted);

        assert_eq!(buffer.layer(DrawLayer::Background).count(), 1);
        // The first floor column lies left of the scene inset
        assert_eq!(buffer.layer(DrawLayer::Tiles).count(), 9);
        assert_eq!(buffer.layer(DrawLayer::Enemies).count(), 1);
        assert_eq!(buffer.layer(DrawLayer::Projectiles).count(), 1);
        assert_eq!(buffer.layer(DrawLayer::Items).count(), 1);
        assert_eq!(buffer.layer(DrawLayer::Player).count(), 1);
        assert_eq!(buffer.layer(DrawLayer::Debug).count(), 2);
        assert_eq!(buffer.layer(DrawLayer::GameOver).count(), 0);
    }

    #[test]
    fn test_world_requests_carry_camera_transform() {
        let world = world();
        let mut buffer = CommandBuffer::new();
        draw_frame(&world, &mut buffer);

        let player = buffer.layer(DrawLayer::Player).next().unwrap();
        assert_eq!(player.transform, world.camera.transform());
        assert_eq!(player.rect, world.player.body.bounding_box());

        let background = buffer.layer(DrawLayer::Background).next().unwrap();
        assert_eq!(background.transform, Transform::IDENTITY);
    }

    #[test]
    fn test_inactive_entities_not_drawn() {
        let mut world = world();
        world.items[0].body.deactivate();
        world.enemies[0].unit.body.deactivate();

        let mut buffer = CommandBuffer::new();
        draw_frame(&world, &mut buffer);
        assert_eq!(buffer.layer(DrawLayer::Items).count(), 0);
        assert_eq!(buffer.layer(DrawLayer::Enemies).count(), 0);
        assert_eq!(buffer.layer(DrawLayer::Debug).count(), 0);
    }

    #[test]
    fn test_game_over_replaces_scene() {
        let mut world = world();
        world.phase = WorldPhase::GameOver;

        let mut buffer = CommandBuffer::new();
        draw_frame(&world, &mut buffer);
        assert_eq!(buffer.len(), 1);
        assert_eq!(buffer.requests()[0].sprite, Sprite::GameOverBanner);
    }
}
