use tracing::debug;

use crate::domain::card::Card;
use crate::domain::shoe::Shoe;
use crate::engine::errors::EngineError;
use crate::engine::RandomSource;

/// Равномерно перемешать шуз (Фишер–Йетс через внедрённый RNG).
pub fn shuffle_shoe<R: RandomSource>(shoe: &mut Shoe, rng: &mut R) {
    rng.shuffle(&mut shoe.cards);
}

/// Собрать и сразу перемешать шуз на `deck_count` колод.
pub fn fresh_shoe<R: RandomSource>(deck_count: u8, rng: &mut R) -> Shoe {
    let mut shoe = Shoe::build(deck_count);
    shuffle_shoe(&mut shoe, rng);
    shoe
}

/// Снять верхнюю карту. Пустой шуз — нарушение контракта вызывающего кода.
pub fn draw(shoe: &mut Shoe) -> Result<Card, EngineError> {
    shoe.draw_one().ok_or(EngineError::EmptyShoe)
}

/// Пересобрать шуз, если карт осталось меньше порога.
/// Возвращает `true`, если пересборка была.
pub fn reshuffle_if_needed<R: RandomSource>(shoe: &mut Shoe, rng: &mut R, threshold: usize) -> bool {
    if !shoe.needs_reshuffle(threshold) {
        return false;
    }
    debug!(
        remaining = shoe.len(),
        decks = shoe.deck_count,
        "shoe below reshuffle threshold, rebuilding"
    );
    shoe.rebuild();
    shuffle_shoe(shoe, rng);
    true
}

/// Раздать одну карту с проактивной пересборкой шуза.
pub fn deal_card<R: RandomSource>(
    shoe: &mut Shoe,
    rng: &mut R,
    threshold: usize,
) -> Result<Card, EngineError> {
    reshuffle_if_needed(shoe, rng, threshold);
    draw(shoe)
}
