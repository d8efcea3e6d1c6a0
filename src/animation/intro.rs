//! The one-shot entrance sequence, fired on scene-ready.
//!
//! Four concurrent tweens: loader fade-out, dish drop-in, dish rotation
//! settle, and title fade-in. Their only ordering guarantee is each one's
//! own start delay; the dish drop's completion is what hands position
//! ownership over to the scroll animator.

use super::easing::EasingFunction;
use super::tween::{Channel, Tween};
use crate::options::IntroOptions;
use crate::page::{ElementRef, Property};

/// Build the entrance tweens from the configured timings.
#[must_use]
pub fn intro_tweens(options: &IntroOptions) -> Vec<Tween> {
    let [tilt_x, tilt_y] = options.dish_tilt_offset;
    vec![
        // Loader overlay fades out; the engine removes it on completion.
        Tween::new(
            Channel::Element(ElementRef::Loader, Property::Opacity),
            1.0,
            0.0,
            options.loader_fade,
        )
        .with_delay(options.loader_delay)
        .with_easing(EasingFunction::QuadraticOut),
        // Dish drops in from below its resting position.
        Tween::new(
            Channel::DishPositionY,
            options.dish_drop_offset,
            0.0,
            options.dish_drop,
        )
        .with_easing(EasingFunction::ENTRANCE),
        // Rotation settles from a tilted start.
        Tween::new(Channel::DishRotationX, tilt_x, 0.0, options.dish_settle)
            .with_easing(EasingFunction::CubicOut),
        Tween::new(Channel::DishRotationY, tilt_y, 0.0, options.dish_settle)
            .with_easing(EasingFunction::CubicOut),
        // Title reveal.
        Tween::new(
            Channel::Element(ElementRef::HeroTitle, Property::Opacity),
            0.0,
            1.0,
            options.title_fade,
        )
        .with_delay(options.title_delay)
        .with_easing(EasingFunction::CubicOut),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intro_covers_all_four_entrance_targets() {
        let tweens = intro_tweens(&IntroOptions::default());
        let channels: Vec<Channel> =
            tweens.iter().map(|t| t.channel).collect();

        assert!(channels.contains(&Channel::Element(
            ElementRef::Loader,
            Property::Opacity
        )));
        assert!(channels.contains(&Channel::DishPositionY));
        assert!(channels.contains(&Channel::DishRotationX));
        assert!(channels.contains(&Channel::DishRotationY));
        assert!(channels.contains(&Channel::Element(
            ElementRef::HeroTitle,
            Property::Opacity
        )));
    }

    #[test]
    fn timings_follow_the_designed_sequence() {
        let tweens = intro_tweens(&IntroOptions::default());
        for tween in tweens {
            match tween.channel {
                Channel::Element(ElementRef::Loader, _) => {
                    assert_eq!(tween.delay, 0.5);
                    assert_eq!(tween.duration, 1.2);
                    assert_eq!(tween.from, 1.0);
                    assert_eq!(tween.to, 0.0);
                }
                Channel::DishPositionY => {
                    assert_eq!(tween.delay, 0.0);
                    assert_eq!(tween.duration, 2.2);
                    assert_eq!(tween.from, -3.0);
                }
                Channel::DishRotationX => {
                    assert_eq!(tween.duration, 2.5);
                    assert_eq!(tween.from, 0.5);
                }
                Channel::DishRotationY => {
                    assert_eq!(tween.duration, 2.5);
                    assert_eq!(tween.from, -0.5);
                }
                Channel::Element(ElementRef::HeroTitle, _) => {
                    assert_eq!(tween.delay, 1.0);
                    assert_eq!(tween.duration, 1.5);
                    assert_eq!(tween.to, 1.0);
                }
                other => panic!("unexpected intro channel {other:?}"),
            }
        }
    }
}
