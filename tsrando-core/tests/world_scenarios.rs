use tsrando_core::solver::{available_from_picked_up, obtain_to_fixed_point, obtained_capabilities};
use tsrando_core::{
    check_completion, is_completable, progression_chain, Completion, GameSave, ItemInfoProvider,
    ItemKey, ItemLocationMap, ItemUnlockingMap, Placement, Requirement as R, Seed, SeedOptions,
};

/// Hands the elevator keycard out early and moves the gas mask into the past.
const WINNABLE_PLACEMENT: &str = r#"{
    "2.23.136.304": { "Relic": "FoeScanner" },
    "2.44.680.368": { "Relic": "ElevatorKeycard" },
    "10.10.104.192": { "UseItem": "EssenceCrystal" },
    "3.30.296.176": { "Relic": "AirMask" }
}"#;

fn world(options: SeedOptions) -> (ItemLocationMap, ItemInfoProvider) {
    let unlocking_map =
        ItemUnlockingMap::with_pyramid_keys_unlock(Seed::new(0x2A), R::GATE_ACCESS_TO_PAST);
    let provider = ItemInfoProvider::new(options, unlocking_map);
    let map = ItemLocationMap::new(&provider, unlocking_map, options).unwrap();
    (map, provider)
}

fn winnable_world(options: SeedOptions) -> ItemLocationMap {
    let (mut map, provider) = world(options);
    Placement::from_json(WINNABLE_PLACEMENT)
        .unwrap()
        .apply(&mut map, &provider)
        .unwrap();
    map
}

#[test]
fn vanilla_items_stall_before_the_elevator_keycard() {
    let (map, _) = world(SeedOptions::default());

    assert_eq!(
        obtain_to_fixed_point(&map, R::NONE),
        R::TIME_STOP | R::TIMESPINNER_WHEEL | R::CARD_D | R::CARD_C | R::TABLET
    );
    assert_eq!(check_completion(&map), Completion::GassMaskUnreachable);
}

#[test]
fn start_region_opens_without_capabilities() {
    let (map, _) = world(SeedOptions::default());

    let lakebed = map.get(ItemKey::new(1, 1, 1528, 144)).unwrap();
    assert!(lakebed.gate.satisfied_by(R::NONE));

    let refugee_camp = map.get(ItemKey::room(3, 0)).unwrap();
    assert!(!refugee_camp.gate.satisfied_by(R::NONE));
    assert_eq!(
        obtained_capabilities(&map, R::NONE),
        R::TIMESPINNER_WHEEL | R::TIME_STOP
    );
}

#[test]
fn inverted_seeds_swap_the_starting_era() {
    let inverted = SeedOptions {
        inverted: true,
        ..SeedOptions::default()
    };
    let (map, _) = world(inverted);
    let (normal, _) = world(SeedOptions::default());

    assert!(map.get(ItemKey::room(3, 0)).unwrap().gate.satisfied_by(R::NONE));
    assert!(!map
        .get(ItemKey::new(1, 1, 1528, 144))
        .unwrap()
        .gate
        .satisfied_by(R::NONE));

    let held = R::GATE_LAKE_DESOLATION;
    assert!(map.gates().access_to_lake_desolation.satisfied_by(held));
    assert!(!normal.gates().access_to_past.satisfied_by(held));
}

#[test]
fn crafted_placement_is_completable() {
    let map = winnable_world(SeedOptions::default());

    assert_eq!(check_completion(&map), Completion::Completable);
    assert!(map.goal().satisfied_by(obtain_to_fixed_point(&map, R::NONE)));
}

#[test]
fn progression_waves_start_with_the_wheel() {
    let map = winnable_world(SeedOptions::default());
    let chain = progression_chain(&map);

    assert_eq!(chain.len(), 11);
    assert_eq!(chain.waves()[0], vec![ItemKey::new(1, 9, 600, 162)]);
    assert_eq!(
        chain.waves()[1],
        vec![
            ItemKey::new(2, 54, 296, 176),
            ItemKey::new(2, 41, 404, 246),
            ItemKey::new(2, 44, 680, 368),
        ]
    );
    assert_eq!(
        chain.waves().last().unwrap(),
        &vec![ItemKey::new(16, 16, 1512, 144)]
    );

    let progression = map.iter().filter(|l| l.holds_progression()).count();
    assert_eq!(chain.locations().count(), progression);
}

#[test]
fn exploration_settles_within_one_step_per_capability() {
    let map = winnable_world(SeedOptions::default());
    let bound = R::ALL.flag_count() as usize;

    let mut held = R::NONE;
    let mut steps = 0;
    loop {
        let next = obtained_capabilities(&map, held);
        steps += 1;
        if next == held {
            break;
        }
        assert!(steps <= bound);
        held = next;
    }

    assert_eq!(held, obtain_to_fixed_point(&map, R::NONE));
    assert!(progression_chain(&map).len() <= bound);
}

#[test]
fn progressive_keycards_in_one_room_invalidate_the_placement() {
    let options = SeedOptions {
        progressive_keycards: true,
        ..SeedOptions::default()
    };
    let (mut map, provider) = world(options);
    Placement::from_json(WINNABLE_PLACEMENT)
        .unwrap()
        .apply(&mut map, &provider)
        .unwrap();

    let doubled = Placement::from_json(
        r#"{
            "2.47.216.208": { "Relic": "ScienceKeycardD" },
            "2.47.152.208": { "Relic": "ScienceKeycardC" }
        }"#,
    )
    .unwrap();
    doubled.apply(&mut map, &provider).unwrap();

    assert_eq!(check_completion(&map), Completion::ProgressiveItemsShareRoom);
    assert!(!is_completable(&map));
}

#[test]
fn save_state_drives_the_live_capabilities() {
    let mut map = winnable_world(SeedOptions::default());
    let save = GameSave::from_json(r#"{ "collected": ["1.9.600.162", "2.54"] }"#).unwrap();
    map.initialize(&save);

    assert_eq!(
        available_from_picked_up(&map),
        R::TIMESPINNER_WHEEL | R::TIME_STOP | R::CARD_D
    );
    assert!(!map.get(ItemKey::new(2, 41, 404, 246)).unwrap().picked_up);
}

#[test]
fn live_progressive_pickups_follow_the_chain() {
    let options = SeedOptions {
        progressive_keycards: true,
        ..SeedOptions::default()
    };
    let (mut map, _) = world(options);
    map.initialize(&GameSave::default());

    map.pick_up(ItemKey::new(2, 40, 344, 176));
    assert_eq!(available_from_picked_up(&map), R::CARD_D);

    map.pick_up(ItemKey::new(9, 10, 248, 848));
    assert_eq!(available_from_picked_up(&map), R::CARD_D | R::CARD_C);
}

#[test]
fn room_keys_answer_for_any_position() {
    let (map, _) = world(SeedOptions::default());

    assert_eq!(map.get(ItemKey::new(11, 21, 312, 192)).unwrap().name, "Genza");
    assert!(map.get(ItemKey::new(11, 22, 312, 192)).is_none());
}

#[test]
fn talaria_counts_as_collected_after_initialize() {
    let options = SeedOptions {
        start_with_talaria: true,
        ..SeedOptions::default()
    };
    let (mut map, _) = world(options);
    map.initialize(&GameSave::default());

    assert_eq!(available_from_picked_up(&map), R::FORWARD_DASH);
}

#[test]
fn seed_text_parses_as_hex() {
    assert_eq!("0000002A".parse::<Seed>().unwrap().value(), 42);
    assert!(Seed::from_hex("ZZZZZZZZ").is_none());
}
