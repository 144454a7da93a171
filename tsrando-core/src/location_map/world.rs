use crate::gate::Gate;
use crate::items::{
    EquipmentType as Equip, FamiliarType as Familiar, ItemIdentifier, ItemProvider,
    OrbSlot as Slot, OrbType as Orb, RelicType as Relic, StatType as Stat, UseItemType as Use,
};
use crate::location::{ItemKey, ItemLocation};
use crate::requirement::Requirement as R;
use crate::seed::SeedOptions;
use crate::Result;

use super::ItemLocationMap;

const BASE_LOCATIONS: usize = 166;

/// Number of locations the world holds for `options`.
pub fn expected_location_count(options: &SeedOptions) -> usize {
    let mut count = BASE_LOCATIONS;

    if options.start_with_talaria {
        count += 1;
    }
    if options.downloadable_items {
        count += 14;
    }
    if options.gyre_archives {
        count += 9;
    }
    if options.cantoran {
        count += 1;
    }
    if options.lore_checks {
        count += 22;
    }

    count
}

/// Named access conditions for the regions of the world.
///
/// Location gates are built from these. Regions further into the game are
/// expressed in terms of the ones leading to them, so a region's gate
/// already carries every requirement on the way there.
#[derive(Clone, Debug)]
pub struct WorldGates {
    /// Added to every secret room; empty unless the eye orb ring is required.
    pub oculus_rift: R,
    /// Added to the poisoned Maw areas; empty unless the gas mask is required there.
    pub maw_gass_mask: R,

    pub access_to_past: Gate,
    pub access_to_lake_desolation: Gate,

    pub multiple_small_jumps_of_npc: Gate,
    pub double_jump_of_npc: Gate,
    pub forward_dash_double_jump: Gate,
    pub lower_lake_desolation_bridge: Gate,

    // past
    pub left_side_forest_caves: Gate,
    pub upper_lake_serene: Gate,
    pub lower_lake_serene: Gate,
    pub lower_caves_of_banishment: Gate,
    pub upper_caves_of_banishment: Gate,
    pub castle_ramparts: Gate,
    pub castle_keep: Gate,
    pub royal_tower: Gate,
    pub mid_royal_tower: Gate,
    pub upper_royal_tower: Gate,
    pub kill_maw: Gate,
    pub kill_twins: Gate,
    pub kill_aelana: Gate,

    // present
    pub upper_lake_desolation: Gate,
    pub left_library: Gate,
    pub upper_left_library: Gate,
    pub ifrits_lair: Gate,
    pub mid_library: Gate,
    pub upper_right_side_library: Gate,
    pub right_side_library_elevator: Gate,
    pub lower_right_side_library: Gate,
    pub sealed_caves_left: Gate,
    pub sealed_caves_lower: Gate,
    pub sealed_caves_sirens: Gate,
    pub military_fortress: Gate,
    pub ravenlords_lair: Gate,
    pub military_fortress_hangar: Gate,
    pub right_side_military_fortress_hangar: Gate,
    pub the_lab: Gate,
    pub the_lab_powered_off: Gate,
    pub upper_lab: Gate,
    pub emperors_tower: Gate,

    // pyramid
    pub temporal_gyre: Gate,
    pub left_pyramid: Gate,
    pub nightmare: Gate,
}

impl WorldGates {
    pub fn new(options: &SeedOptions) -> WorldGates {
        let oculus_rift = if options.require_eye_orb_ring {
            R::OCULUS_RIFT
        } else {
            R::NONE
        };
        let maw_gass_mask = if options.gass_maw {
            R::GASS_MASK
        } else {
            R::NONE
        };

        let access_to_lake_desolation = if options.inverted {
            Gate::any_of(
                R::GATE_LAKE_DESOLATION
                    | R::GATE_KITTY_BOSS
                    | R::GATE_LEFT_LIBRARY
                    | R::GATE_SEALED_CAVES,
            ) | (R::GATE_SEALED_SIRENS_CAVE & R::CARD_E)
                | (Gate::any_of(R::CARD_E | R::CARD_B) & R::GATE_MILITARY_GATE)
        } else {
            Gate::none()
        };

        let lower_lake_desolation_bridge = &access_to_lake_desolation
            & Gate::any_of(
                R::TIME_STOP | R::FORWARD_DASH | R::GATE_KITTY_BOSS | R::GATE_LEFT_LIBRARY,
            );

        // Through the library timespinner, or a teleporter straight into the past.
        let access_to_past = if options.inverted {
            Gate::none()
        } else {
            ((R::TIMESPINNER_WHEEL & R::TIMESPINNER_SPINDLE)
                & ((&lower_lake_desolation_bridge & R::CARD_D)
                    | (R::GATE_SEALED_SIRENS_CAVE & R::CARD_E)
                    | (Gate::any_of(R::CARD_B | R::CARD_E) & R::GATE_MILITARY_GATE)))
                | Gate::any_of(
                    R::GATE_LAKE_SERENE_LEFT
                        | R::GATE_ACCESS_TO_PAST
                        | R::GATE_LAKE_SERENE_RIGHT
                        | R::GATE_ROYAL_TOWERS
                        | R::GATE_CASTLE_RAMPARTS
                        | R::GATE_CASTLE_KEEP,
                )
                | (Gate::any_of(R::GATE_CAVES_OF_BANISHMENT | R::GATE_MAW) & maw_gass_mask)
        };

        let multiple_small_jumps_of_npc = Gate::any_of(R::TIMESPINNER_WHEEL | R::UPWARD_DASH);
        let double_jump_of_npc = (R::DOUBLE_JUMP & R::TIMESPINNER_WHEEL) | R::UPWARD_DASH;
        let forward_dash_double_jump = (R::FORWARD_DASH & R::DOUBLE_JUMP) | R::UPWARD_DASH;

        let left_side_forest_caves = (&access_to_past & Gate::any_of(R::TIME_STOP | R::FORWARD_DASH))
            | R::GATE_LAKE_SERENE_RIGHT
            | R::GATE_LAKE_SERENE_LEFT;
        let upper_lake_serene = (&left_side_forest_caves & Gate::any_of(R::TIME_STOP | R::SWIMMING))
            | R::GATE_LAKE_SERENE_LEFT;
        let lower_lake_serene = (&left_side_forest_caves | R::GATE_LAKE_SERENE_LEFT) & R::SWIMMING;
        let lower_caves_of_banishment = &lower_lake_serene
            | R::GATE_CAVES_OF_BANISHMENT
            | (R::GATE_MAW & R::DOUBLE_JUMP);
        let upper_caves_of_banishment = access_to_past.clone();
        let castle_ramparts = access_to_past.clone();
        let castle_keep = castle_ramparts.clone();
        let royal_tower = (&castle_keep & R::DOUBLE_JUMP) | R::GATE_ROYAL_TOWERS;
        let mid_royal_tower =
            &royal_tower & (&multiple_small_jumps_of_npc | &forward_dash_double_jump);
        let upper_royal_tower = &mid_royal_tower & R::DOUBLE_JUMP;
        let kill_maw = (&lower_lake_serene | R::GATE_CAVES_OF_BANISHMENT | R::GATE_MAW)
            & maw_gass_mask;
        let kill_twins = &castle_keep & R::TIME_STOP;
        let kill_aelana = upper_royal_tower.clone();

        let upper_lake_desolation =
            &access_to_lake_desolation & &upper_lake_serene & R::ANTI_WEED;
        let left_library = &upper_lake_desolation
            | &lower_lake_desolation_bridge
            | R::GATE_LEFT_LIBRARY
            | R::GATE_KITTY_BOSS
            | (R::GATE_SEALED_SIRENS_CAVE & R::CARD_E)
            | (Gate::any_of(R::CARD_B | R::CARD_E) & R::GATE_MILITARY_GATE);
        let mid_library = (&left_library & R::CARD_D)
            | (R::GATE_SEALED_SIRENS_CAVE & R::CARD_E)
            | (Gate::any_of(R::CARD_B | R::CARD_E) & R::GATE_MILITARY_GATE);
        let upper_left_library = &left_library & Gate::any_of(R::DOUBLE_JUMP | R::FORWARD_DASH);
        let ifrits_lair = &upper_left_library & R::KOBO & &access_to_past;
        let upper_right_side_library = (&mid_library & (R::CARD_C | (R::CARD_B & R::CARD_E)))
            | (Gate::any_of(R::GATE_MILITARY_GATE | R::GATE_SEALED_SIRENS_CAVE) & R::CARD_E);
        let right_side_library_elevator = ((&mid_library & Gate::any_of(R::CARD_C | R::CARD_B))
            | R::GATE_MILITARY_GATE
            | R::GATE_SEALED_SIRENS_CAVE)
            & R::CARD_E;
        let lower_right_side_library = (&mid_library & R::CARD_B)
            | &right_side_library_elevator
            | R::GATE_MILITARY_GATE
            | (R::GATE_SEALED_SIRENS_CAVE & R::CARD_E);
        let sealed_caves_left =
            (&access_to_lake_desolation & R::DOUBLE_JUMP) | R::GATE_SEALED_CAVES;
        let sealed_caves_lower = &sealed_caves_left & R::CARD_A;
        let sealed_caves_sirens =
            (&mid_library & R::CARD_B & R::CARD_E) | R::GATE_SEALED_SIRENS_CAVE;
        let military_fortress =
            &lower_right_side_library & &kill_maw & &kill_twins & &kill_aelana;
        let military_fortress_hangar = military_fortress.clone();
        let right_side_military_fortress_hangar = &military_fortress_hangar & R::DOUBLE_JUMP;
        let the_lab = &military_fortress_hangar & R::CARD_B;
        let the_lab_powered_off = &the_lab & &double_jump_of_npc;
        let upper_lab = &the_lab_powered_off & &forward_dash_double_jump;
        let ravenlords_lair = &upper_lab & R::MERCHANT_CROW;
        let emperors_tower = upper_lab.clone();

        let temporal_gyre = &military_fortress & R::TIMESPINNER_WHEEL;
        let left_pyramid = &upper_lab
            & (R::TIMESPINNER_WHEEL
                | R::TIMESPINNER_SPINDLE
                | R::TIMESPINNER_PIECE1
                | R::TIMESPINNER_PIECE2
                | R::TIMESPINNER_PIECE3);
        let nightmare = &left_pyramid & R::UPWARD_DASH;

        WorldGates {
            oculus_rift,
            maw_gass_mask,
            access_to_past,
            access_to_lake_desolation,
            multiple_small_jumps_of_npc,
            double_jump_of_npc,
            forward_dash_double_jump,
            lower_lake_desolation_bridge,
            left_side_forest_caves,
            upper_lake_serene,
            lower_lake_serene,
            lower_caves_of_banishment,
            upper_caves_of_banishment,
            castle_ramparts,
            castle_keep,
            royal_tower,
            mid_royal_tower,
            upper_royal_tower,
            kill_maw,
            kill_twins,
            kill_aelana,
            upper_lake_desolation,
            left_library,
            upper_left_library,
            ifrits_lair,
            mid_library,
            upper_right_side_library,
            right_side_library_elevator,
            lower_right_side_library,
            sealed_caves_left,
            sealed_caves_lower,
            sealed_caves_sirens,
            military_fortress,
            ravenlords_lair,
            military_fortress_hangar,
            right_side_military_fortress_hangar,
            the_lab,
            the_lab_powered_off,
            upper_lab,
            emperors_tower,
            temporal_gyre,
            left_pyramid,
            nightmare,
        }
    }
}

struct World<'a, P: ?Sized> {
    map: &'a mut ItemLocationMap,
    provider: &'a P,
    area: &'static str,
}

impl<P: ItemProvider + ?Sized> World<'_, P> {
    fn area(&mut self, area: &'static str) {
        self.area = area;
    }

    fn add(
        &mut self,
        key: ItemKey,
        name: &str,
        item: Option<ItemIdentifier>,
        gate: impl Into<Gate>,
    ) -> Result<()> {
        let item = item.map(|identifier| self.provider.get(identifier));
        self.map
            .add(ItemLocation::new(key, self.area, name, item, gate.into()))
    }
}

fn use_item(item: Use) -> Option<ItemIdentifier> {
    Some(ItemIdentifier::UseItem(item))
}

fn relic(relic: Relic) -> Option<ItemIdentifier> {
    Some(ItemIdentifier::Relic(relic))
}

fn orb(orb: Orb, slot: Slot) -> Option<ItemIdentifier> {
    Some(ItemIdentifier::Orb(orb, slot))
}

fn equipment(equipment: Equip) -> Option<ItemIdentifier> {
    Some(ItemIdentifier::Equipment(equipment))
}

fn familiar(familiar: Familiar) -> Option<ItemIdentifier> {
    Some(ItemIdentifier::Familiar(familiar))
}

fn stat(stat: Stat) -> Option<ItemIdentifier> {
    Some(ItemIdentifier::Stat(stat))
}

/// Fills `map` with every location its options call for, vanilla items
/// included. Order is fixed: present, past, pyramid, then the optional groups.
pub(super) fn add_locations<P: ItemProvider + ?Sized>(
    map: &mut ItemLocationMap,
    provider: &P,
) -> Result<()> {
    let gates = map.gates().clone();
    let options = *map.options();
    let mut world = World {
        map,
        provider,
        area: "",
    };

    present(&mut world, &gates)?;
    past(&mut world, &gates)?;
    pyramid(&mut world, &gates)?;

    if options.gyre_archives {
        temporal_gyre(&mut world, &gates)?;
    }
    if options.downloadable_items {
        terminals(&mut world, &gates)?;
    }
    if options.cantoran {
        cantoran(&mut world, &gates)?;
    }
    if options.lore_checks {
        lore(&mut world, &gates)?;
    }
    if options.start_with_talaria {
        let mut talaria = ItemLocation::new(
            ItemKey::EXTERNAL_START,
            "Starting Items",
            "Talaria Attachment",
            Some(provider.get(ItemIdentifier::Relic(Relic::Dash))),
            Gate::none(),
        );
        talaria.picked_up = true;
        world.map.add(talaria)?;
    }

    Ok(())
}

fn present<P: ItemProvider + ?Sized>(w: &mut World<'_, P>, g: &WorldGates) -> Result<()> {
    w.area("Tutorial");
    w.add(ItemKey::TUTORIAL_MELEE_ORB, "Yo Momma", orb(Orb::Blue, Slot::Melee), Gate::none())?;
    w.add(ItemKey::TUTORIAL_SPELL_ORB, "Yo Momma", orb(Orb::Blue, Slot::Spell), Gate::none())?;
    w.area("Lake Desolation");
    w.add(
        ItemKey::new(1, 1, 1528, 144),
        "Desolation Start lakebed",
        use_item(Use::FuturePotion),
        &g.access_to_lake_desolation,
    )?;
    w.add(
        ItemKey::new(1, 15, 264, 144),
        "Desolation Start upper entrance",
        equipment(Equip::OldCoat),
        &g.access_to_lake_desolation,
    )?;
    w.add(
        ItemKey::new(1, 25, 296, 176),
        "Desolation Start warp gate",
        use_item(Use::FutureHiPotion),
        &g.access_to_lake_desolation,
    )?;
    w.add(
        ItemKey::new(1, 9, 600, 162),
        "Timespinner Wheel room",
        relic(Relic::TimespinnerWheel),
        &g.access_to_lake_desolation,
    )?;
    w.add(
        ItemKey::new(1, 14, 40, 176),
        "Desolation behind azure fire",
        use_item(Use::EssenceCrystal),
        &g.upper_lake_desolation,
    )?;
    w.add(
        ItemKey::room(1, 5),
        "Feline Sentry",
        orb(Orb::Blade, Slot::Melee),
        &g.upper_lake_desolation | &g.lower_lake_desolation_bridge,
    )?;
    w.area("Lower Lake Desolation");
    w.add(
        ItemKey::new(1, 2, 1016, 384),
        "Lower Desolation T chest",
        stat(Stat::MaxSand),
        &g.access_to_lake_desolation & R::TIME_STOP,
    )?;
    w.add(
        ItemKey::new(1, 11, 72, 240),
        "Lower Desolation secret",
        stat(Stat::MaxHp),
        &g.lower_lake_desolation_bridge & g.oculus_rift,
    )?;
    w.add(
        ItemKey::new(1, 3, 56, 176),
        "Desolation End frozen Cheveur Tank",
        stat(Stat::MaxAura),
        &g.access_to_lake_desolation & R::TIME_STOP,
    )?;
    w.area("Upper Lake Desolation");
    w.add(
        ItemKey::new(1, 17, 152, 96),
        "Upper Desolation Cheveur Tanks",
        use_item(Use::GoldRing),
        &g.upper_lake_desolation,
    )?;
    w.add(
        ItemKey::new(1, 21, 200, 144),
        "Upper Desolation secret",
        use_item(Use::EssenceCrystal),
        &g.upper_lake_desolation & g.oculus_rift,
    )?;
    w.add(
        ItemKey::new(1, 20, 232, 96),
        "Upper Desolation double top",
        use_item(Use::MagicMarbles),
        &g.upper_lake_desolation & R::DOUBLE_JUMP,
    )?;
    w.add(
        ItemKey::new(1, 20, 168, 240),
        "Upper Desolation double bottom",
        use_item(Use::FuturePotion),
        &g.upper_lake_desolation,
    )?;
    w.add(
        ItemKey::new(1, 22, 344, 160),
        "Upper Desolation 3 Sparrows",
        use_item(Use::FutureHiPotion),
        &g.upper_lake_desolation,
    )?;
    w.add(
        ItemKey::new(1, 18, 1320, 189),
        "Desolation Crash Site pedestal",
        orb(Orb::Moon, Slot::Melee),
        &g.upper_lake_desolation,
    )?;
    w.add(
        ItemKey::new(1, 18, 1272, 192),
        "Desolation Crash Site chest",
        equipment(Equip::CaptainsCap),
        &g.upper_lake_desolation & R::GASS_MASK & &g.kill_maw,
    )?;
    w.add(
        ItemKey::new(1, 18, 1368, 192),
        "Desolation Crash Site chest",
        equipment(Equip::CaptainsJacket),
        &g.upper_lake_desolation & R::GASS_MASK & &g.kill_maw,
    )?;
    w.area("Library");
    w.add(ItemKey::new(2, 60, 328, 160), "Library entrance", stat(Stat::MaxHp), &g.left_library)?;
    w.add(
        ItemKey::new(2, 54, 296, 176),
        "Library warp gate",
        relic(Relic::ScienceKeycardD),
        &g.left_library,
    )?;
    w.add(ItemKey::new(2, 41, 404, 246), "Librarian", relic(Relic::Tablet), &g.left_library)?;
    w.add(
        ItemKey::new(2, 44, 680, 368),
        "Library central nook",
        relic(Relic::FoeScanner),
        &g.left_library,
    )?;
    w.add(
        ItemKey::new(2, 47, 216, 208),
        "Library D-lock",
        use_item(Use::Ether),
        &g.left_library & R::CARD_D,
    )?;
    w.add(
        ItemKey::new(2, 47, 152, 208),
        "Library D-lock",
        orb(Orb::Blade, Slot::Passive),
        &g.left_library & R::CARD_D,
    )?;
    w.add(
        ItemKey::new(2, 47, 88, 208),
        "Library D-lock",
        orb(Orb::Blade, Slot::Spell),
        &g.left_library & R::CARD_D,
    )?;
    w.area("Library Top");
    w.add(
        ItemKey::new(2, 56, 168, 192),
        "Backer room",
        use_item(Use::GoldNecklace),
        &g.upper_left_library,
    )?;
    w.add(
        ItemKey::new(2, 56, 392, 192),
        "Backer room",
        use_item(Use::GoldRing),
        &g.upper_left_library,
    )?;
    w.add(
        ItemKey::new(2, 56, 616, 192),
        "Backer room",
        use_item(Use::EssenceCrystal),
        &g.upper_left_library,
    )?;
    w.add(
        ItemKey::new(2, 56, 840, 192),
        "Backer room",
        use_item(Use::EssenceCrystal),
        &g.upper_left_library,
    )?;
    w.add(
        ItemKey::new(2, 56, 1064, 192),
        "Backer room",
        use_item(Use::MagicMarbles),
        &g.upper_left_library,
    )?;
    w.area("Varndagroth Tower Left");
    w.add(
        ItemKey::new(2, 34, 232, 1200),
        "Left Varndagray outside elevator",
        use_item(Use::FiligreeTea),
        &g.mid_library,
    )?;
    w.add(
        ItemKey::new(2, 40, 344, 176),
        "Varndagray Timespinner room",
        relic(Relic::ScienceKeycardC),
        &g.mid_library,
    )?;
    w.add(
        ItemKey::new(2, 32, 328, 160),
        "Left Varndagray lower C-lock",
        use_item(Use::GoldRing),
        &g.mid_library & R::CARD_C,
    )?;
    w.add(
        ItemKey::new(2, 7, 232, 144),
        "Varndagray secret",
        stat(Stat::MaxAura),
        &g.mid_library & g.oculus_rift,
    )?;
    w.add(
        ItemKey::new(2, 25, 328, 192),
        "Left Varndagray elevator chest",
        stat(Stat::MaxSand),
        &g.mid_library & R::CARD_E,
    )?;
    w.area("Varndagroth Tower Right");
    w.add(
        ItemKey::new(2, 15, 760, 192),
        "Varndagray tower bridge",
        use_item(Use::FuturePotion),
        &g.upper_right_side_library,
    )?;
    w.add(
        ItemKey::new(2, 20, 72, 1200),
        "Right Varndagray elevator chest",
        use_item(Use::Jerky),
        &g.right_side_library_elevator,
    )?;
    w.add(
        ItemKey::new(2, 23, 72, 560),
        "Right Varndagray vents bottom",
        use_item(Use::FutureHiPotion),
        &g.upper_right_side_library & Gate::any_of(R::CARD_E | R::DOUBLE_JUMP),
    )?;
    w.add(
        ItemKey::new(2, 23, 1112, 112),
        "Right Varndagray vents right",
        use_item(Use::FutureHiPotion),
        &g.upper_right_side_library & Gate::any_of(R::CARD_E | R::DOUBLE_JUMP),
    )?;
    w.add(
        ItemKey::new(2, 23, 136, 304),
        "Right Varndagray vents left",
        relic(Relic::ElevatorKeycard),
        &g.upper_right_side_library & Gate::any_of(R::CARD_E | R::DOUBLE_JUMP),
    )?;
    w.add(
        ItemKey::new(2, 11, 104, 192),
        "Right Varndagray bottom floor",
        use_item(Use::EssenceCrystal),
        &g.lower_right_side_library,
    )?;
    w.add(
        ItemKey::new(2, 29, 280, 240),
        "Varndagroth",
        relic(Relic::TimespinnerSpindle),
        &g.right_side_library_elevator & R::CARD_C,
    )?;
    w.add(
        ItemKey::room(2, 52),
        "Varndagray spider hell",
        relic(Relic::TimespinnerGear2),
        &g.right_side_library_elevator & R::CARD_A,
    )?;
    w.area("Sealed Caves (Xarion)");
    w.add(
        ItemKey::new(9, 10, 248, 848),
        "Sealed Cave Skeleton",
        relic(Relic::ScienceKeycardB),
        &g.sealed_caves_left,
    )?;
    w.add(
        ItemKey::new(9, 19, 664, 704),
        "Sealed Cave Fungus jump",
        use_item(Use::Antidote),
        &g.sealed_caves_lower & R::TIME_STOP,
    )?;
    w.add(
        ItemKey::new(9, 39, 88, 192),
        "Sealed Cave Fungus and Ichor",
        use_item(Use::Antidote),
        &g.sealed_caves_lower,
    )?;
    w.add(
        ItemKey::new(9, 41, 312, 192),
        "Sealed Cave mini jackpot",
        use_item(Use::GalaxyStone),
        &g.sealed_caves_lower & &g.forward_dash_double_jump,
    )?;
    w.add(
        ItemKey::new(9, 42, 328, 192),
        "Sealed Cave waterfall mid",
        use_item(Use::MagicMarbles),
        &g.sealed_caves_lower,
    )?;
    w.add(
        ItemKey::new(9, 12, 280, 160),
        "Sealed Cave secret",
        stat(Stat::MaxHp),
        &g.sealed_caves_lower & g.oculus_rift,
    )?;
    w.add(
        ItemKey::new(9, 48, 104, 160),
        "Sealed Cave beside secret",
        use_item(Use::FutureEther),
        &g.sealed_caves_lower,
    )?;
    w.add(
        ItemKey::new(9, 15, 248, 192),
        "Sealed Cave last chest",
        use_item(Use::FutureEther),
        &g.sealed_caves_lower & R::DOUBLE_JUMP,
    )?;
    w.add(ItemKey::room(9, 13), "Xarion", relic(Relic::TimespinnerGear3), &g.sealed_caves_lower)?;
    w.area("Sealed Caves (Sirens)");
    w.add(
        ItemKey::new(9, 5, 88, 496),
        "Upper Sealed Cave underwater hook",
        stat(Stat::MaxSand),
        &g.sealed_caves_sirens & R::SWIMMING,
    )?;
    w.add(
        ItemKey::new(9, 3, 1848, 576),
        "Upper Sealed Cave sirens right",
        equipment(Equip::BirdStatue),
        &g.sealed_caves_sirens & R::SWIMMING,
    )?;
    w.add(
        ItemKey::new(9, 3, 744, 560),
        "Upper Sealed Cave sirens left",
        stat(Stat::MaxAura),
        &g.sealed_caves_sirens & R::SWIMMING,
    )?;
    w.add(
        ItemKey::new(9, 2, 184, 176),
        "Upper Sealed Cave end",
        use_item(Use::WarpCard),
        &g.sealed_caves_sirens,
    )?;
    w.add(
        ItemKey::new(9, 2, 104, 160),
        "Upper Sealed Cave end",
        relic(Relic::WaterMask),
        &g.sealed_caves_sirens,
    )?;
    w.area("Military Fortress");
    w.add(
        ItemKey::new(10, 3, 264, 128),
        "Hangar Bombers chest",
        stat(Stat::MaxSand),
        &g.military_fortress & &g.double_jump_of_npc & R::TIMESPINNER_WHEEL,
    )?;
    w.add(
        ItemKey::new(10, 11, 296, 192),
        "Hangar straight from entrance",
        stat(Stat::MaxAura),
        &g.military_fortress,
    )?;
    w.add(
        ItemKey::new(10, 4, 1064, 176),
        "Hangar bridge left",
        use_item(Use::FutureHiPotion),
        &g.military_fortress_hangar,
    )?;
    w.add(
        ItemKey::new(10, 10, 104, 192),
        "Hangar Giantess room",
        relic(Relic::AirMask),
        &g.military_fortress_hangar,
    )?;
    w.add(
        ItemKey::new(10, 8, 1080, 176),
        "Hangar bridge right",
        equipment(Equip::LabGlasses),
        &g.military_fortress_hangar,
    )?;
    w.add(
        ItemKey::new(10, 7, 104, 192),
        "Hangar B-lock",
        use_item(Use::PlasmaIv),
        &g.right_side_military_fortress_hangar & R::CARD_B,
    )?;
    w.add(
        ItemKey::new(10, 7, 152, 192),
        "Hangar B-lock",
        stat(Stat::MaxSand),
        &g.right_side_military_fortress_hangar & R::CARD_B,
    )?;
    w.add(
        ItemKey::new(10, 18, 280, 189),
        "Hangar pedestal",
        orb(Orb::Gun, Slot::Melee),
        &g.right_side_military_fortress_hangar
            & (&g.double_jump_of_npc | &g.forward_dash_double_jump),
    )?;
    w.area("The Lab");
    w.add(
        ItemKey::new(11, 36, 312, 192),
        "Lab coffee break",
        use_item(Use::FoodSynth),
        &g.the_lab,
    )?;
    w.add(
        ItemKey::new(11, 3, 1528, 192),
        "Lab lower trash right",
        stat(Stat::MaxHp),
        &g.the_lab & R::DOUBLE_JUMP,
    )?;
    w.add(
        ItemKey::new(11, 3, 72, 192),
        "Lab lower trash left",
        use_item(Use::FuturePotion),
        &g.the_lab & R::UPWARD_DASH,
    )?;
    w.add(
        ItemKey::new(11, 25, 104, 192),
        "Lab bottom solo Turret",
        stat(Stat::MaxAura),
        &g.the_lab & R::DOUBLE_JUMP,
    )?;
    w.add(
        ItemKey::new(11, 18, 824, 128),
        "Lab frozen trash room",
        use_item(Use::ChaosHeal),
        &g.the_lab_powered_off,
    )?;
    w.add(
        ItemKey::room(11, 39),
        "Lab's power supply",
        orb(Orb::Eye, Slot::Melee),
        &g.the_lab_powered_off,
    )?;
    w.add(ItemKey::room(11, 21), "Genza", relic(Relic::ScienceKeycardA), &g.upper_lab)?;
    w.add(ItemKey::room(11, 1), "Experiment #13", relic(Relic::Dash), &g.the_lab_powered_off)?;
    w.add(
        ItemKey::new(11, 6, 328, 192),
        "Lab terminal and chest room chest",
        equipment(Equip::LabCoat),
        &g.upper_lab,
    )?;
    w.add(
        ItemKey::new(11, 27, 296, 160),
        "Lab secret",
        stat(Stat::MaxSand),
        &g.upper_lab & g.oculus_rift,
    )?;
    w.add(
        ItemKey::room(11, 26),
        "Lab spider gell",
        relic(Relic::TimespinnerGear1),
        &g.the_lab_powered_off & R::CARD_A,
    )?;
    w.area("Emperor's Tower");
    w.add(
        ItemKey::new(12, 5, 344, 192),
        "Emperor's courtyard bottom",
        stat(Stat::MaxAura),
        &g.emperors_tower,
    )?;
    w.add(
        ItemKey::new(12, 3, 200, 160),
        "Emperor's secret",
        equipment(Equip::LachiemCrown),
        &g.emperors_tower & R::UPWARD_DASH & g.oculus_rift,
    )?;
    w.add(
        ItemKey::new(12, 25, 360, 176),
        "Emperor's courtyard top",
        equipment(Equip::EmpressCoat),
        &g.emperors_tower & R::UPWARD_DASH,
    )?;
    w.add(
        ItemKey::new(12, 22, 56, 192),
        "Emperor's Galactic Sages",
        stat(Stat::MaxSand),
        &g.emperors_tower,
    )?;
    w.add(
        ItemKey::new(12, 9, 344, 928),
        "Right Emperor's Tower bottom",
        use_item(Use::FutureHiEther),
        &g.emperors_tower,
    )?;
    w.add(
        ItemKey::new(12, 19, 72, 192),
        "Right Emperor's Tower top",
        equipment(Equip::FiligreeClasp),
        &g.emperors_tower & &g.double_jump_of_npc,
    )?;
    w.add(
        ItemKey::new(12, 13, 120, 176),
        "Left Emperor's Tower balcony",
        stat(Stat::MaxHp),
        &g.emperors_tower,
    )?;
    w.add(
        ItemKey::new(12, 11, 264, 208),
        "Emperor's room chest",
        relic(Relic::EmpireBrooch),
        &g.emperors_tower,
    )?;
    w.add(
        ItemKey::new(12, 11, 136, 205),
        "Emperor's room pedestal",
        orb(Orb::Empire, Slot::Melee),
        &g.emperors_tower,
    )?;

    Ok(())
}

fn past<P: ItemProvider + ?Sized>(w: &mut World<'_, P>, g: &WorldGates) -> Result<()> {
    w.area("Refugee Camp");
    w.add(
        ItemKey::room(3, 0),
        "Gift from Neliste",
        orb(Orb::Flame, Slot::Melee),
        &g.access_to_past,
    )?;
    w.add(
        ItemKey::new(3, 30, 296, 176),
        "Refugee camp storage",
        use_item(Use::EssenceCrystal),
        &g.access_to_past,
    )?;
    w.add(
        ItemKey::new(3, 30, 232, 176),
        "Refugee camp storage",
        use_item(Use::GoldNecklace),
        &g.access_to_past,
    )?;
    w.add(
        ItemKey::new(3, 30, 168, 176),
        "Refugee camp storage",
        relic(Relic::JewelryBox),
        &g.access_to_past,
    )?;
    w.area("Forest");
    w.add(
        ItemKey::new(3, 3, 648, 272),
        "Refugee camp roof",
        use_item(Use::Herb),
        &g.access_to_past,
    )?;
    w.add(
        ItemKey::new(3, 15, 248, 112),
        "Forest banishment overhang chest",
        stat(Stat::MaxAura),
        &g.access_to_past
            & (&g.double_jump_of_npc
                | &g.forward_dash_double_jump
                | (R::TIME_STOP & R::FORWARD_DASH)),
    )?;
    w.add(
        ItemKey::new(3, 21, 120, 192),
        "Forest secret",
        stat(Stat::MaxSand),
        &g.access_to_past & g.oculus_rift,
    )?;
    w.add(
        ItemKey::new(3, 12, 776, 560),
        "Forest three-way chest",
        equipment(Equip::PointyHat),
        &g.access_to_past,
    )?;
    w.add(
        ItemKey::new(3, 11, 392, 608),
        "Waterfall",
        use_item(Use::MagicMarbles),
        &g.access_to_past & R::SWIMMING,
    )?;
    w.add(
        ItemKey::new(3, 5, 184, 192),
        "Waterfall cave",
        equipment(Equip::Pendulum),
        &g.access_to_past & R::SWIMMING,
    )?;
    w.add(ItemKey::new(3, 2, 584, 368), "Forest stairs", use_item(Use::Potion), &g.access_to_past)?;
    w.add(
        ItemKey::new(3, 29, 248, 192),
        "Serene entrance bat cave",
        stat(Stat::MaxHp),
        &g.left_side_forest_caves,
    )?;
    w.area("Upper Lake Serene");
    w.add(
        ItemKey::new(7, 16, 152, 96),
        "Upper Serene rat nest",
        use_item(Use::MagicMarbles),
        &g.upper_lake_serene,
    )?;
    w.add(
        ItemKey::new(7, 19, 248, 96),
        "Upper Serene double bottom",
        stat(Stat::MaxAura),
        &g.upper_lake_serene & R::DOUBLE_JUMP,
    )?;
    w.add(
        ItemKey::new(7, 19, 168, 240),
        "Upper Serene double top",
        equipment(Equip::TravelersCloak),
        &g.upper_lake_serene,
    )?;
    w.add(
        ItemKey::new(7, 27, 184, 144),
        "Upper Serene secret",
        familiar(Familiar::Griffin),
        &g.upper_lake_serene & g.oculus_rift,
    )?;
    w.add(
        ItemKey::room(7, 28),
        "Serene save room",
        use_item(Use::AlchemistTools),
        &g.upper_lake_serene,
    )?;
    w.add(
        ItemKey::new(7, 13, 56, 176),
        "Serene Queen's ledge",
        use_item(Use::WarpCard),
        &g.upper_lake_serene,
    )?;
    w.add(
        ItemKey::new(7, 30, 296, 176),
        "Serene Queen's warp room",
        relic(Relic::PyramidsKey),
        &g.upper_lake_serene,
    )?;
    w.add(ItemKey::new(7, 3, 120, 204), "Serene Frozen Cheveur ledge", None, &g.upper_lake_serene)?;
    w.area("Lower Lake Serene");
    w.add(
        ItemKey::new(7, 3, 440, 1232),
        "Lower Serene East",
        use_item(Use::Potion),
        &g.lower_lake_serene,
    )?;
    w.add(
        ItemKey::new(7, 7, 1432, 576),
        "Lower Serene under bridge",
        use_item(Use::MagicMarbles),
        &g.lower_lake_serene,
    )?;
    w.add(
        ItemKey::new(7, 20, 248, 96),
        "Lower Serene cave under bridge",
        stat(Stat::MaxSand),
        &g.lower_lake_serene,
    )?;
    w.add(
        ItemKey::new(7, 6, 520, 496),
        "Lower Serene ledge above spikes",
        use_item(Use::Potion),
        &g.lower_lake_serene,
    )?;
    w.add(
        ItemKey::new(7, 11, 88, 240),
        "Lower Serene secret",
        stat(Stat::MaxHp),
        &g.lower_lake_serene & g.oculus_rift,
    )?;
    w.add(
        ItemKey::new(7, 2, 1016, 384),
        "Lower Serene T chest",
        use_item(Use::Ether),
        &g.lower_lake_serene,
    )?;
    w.add(
        ItemKey::new(7, 9, 584, 189),
        "Underwater pedestal",
        orb(Orb::Ice, Slot::Melee),
        &g.lower_lake_serene,
    )?;
    w.area("Caves of Banishment (Maw)");
    w.add(
        ItemKey::new(8, 19, 664, 704),
        "Lower COB Shroom jump",
        use_item(Use::SilverOre),
        &g.lower_caves_of_banishment & R::DOUBLE_JUMP,
    )?;
    w.add(
        ItemKey::new(8, 12, 280, 160),
        "Lower COB secret",
        stat(Stat::MaxHp),
        &g.lower_caves_of_banishment & g.oculus_rift,
    )?;
    w.add(
        ItemKey::new(8, 48, 104, 160),
        "Lower COB beside secret",
        use_item(Use::Spaghetti),
        &g.lower_caves_of_banishment,
    )?;
    w.add(
        ItemKey::new(8, 39, 88, 192),
        "Lower COB Shrooms and Slime",
        use_item(Use::SilverOre),
        &g.lower_caves_of_banishment,
    )?;
    w.add(
        ItemKey::new(8, 41, 168, 192),
        "Lower COB jackpot room",
        use_item(Use::GoldNecklace),
        &g.lower_caves_of_banishment & &g.forward_dash_double_jump,
    )?;
    w.add(
        ItemKey::new(8, 41, 216, 192),
        "Lower COB jackpot room",
        use_item(Use::GoldRing),
        &g.lower_caves_of_banishment & &g.forward_dash_double_jump,
    )?;
    w.add(
        ItemKey::new(8, 41, 264, 192),
        "Lower COB jackpot room",
        use_item(Use::EssenceCrystal),
        &g.lower_caves_of_banishment & &g.forward_dash_double_jump,
    )?;
    w.add(
        ItemKey::new(8, 41, 312, 192),
        "Lower COB jackpot room",
        use_item(Use::MagicMarbles),
        &g.lower_caves_of_banishment & &g.forward_dash_double_jump,
    )?;
    w.add(
        ItemKey::new(8, 42, 216, 189),
        "Lower COB waterfall pedestal",
        orb(Orb::Wind, Slot::Melee),
        &g.lower_caves_of_banishment,
    )?;
    w.add(
        ItemKey::new(8, 15, 248, 192),
        "Lower COB final chest",
        use_item(Use::SilverOre),
        &g.lower_caves_of_banishment & R::DOUBLE_JUMP,
    )?;
    w.add(
        ItemKey::room(8, 21),
        "Lower COB Plasma Crystal",
        use_item(Use::RadiationCrystal),
        &g.lower_caves_of_banishment & Gate::any_of(g.maw_gass_mask | R::FORWARD_DASH),
    )?;
    w.add(
        ItemKey::new(8, 31, 88, 400),
        "Mineshaft",
        use_item(Use::MagicMarbles),
        &g.lower_caves_of_banishment & g.maw_gass_mask,
    )?;
    w.area("Caves of Banishment (Sirens)");
    w.add(
        ItemKey::new(8, 4, 664, 144),
        "Upper COB Wyverns",
        use_item(Use::SilverOre),
        &g.upper_caves_of_banishment,
    )?;
    w.add(
        ItemKey::new(8, 3, 808, 144),
        "Upper COB sirens dry chest",
        use_item(Use::SilverOre),
        &g.upper_caves_of_banishment,
    )?;
    w.add(
        ItemKey::new(8, 3, 744, 560),
        "Upper COB sirens underwater left",
        use_item(Use::SilverOre),
        &g.upper_caves_of_banishment & R::SWIMMING,
    )?;
    w.add(
        ItemKey::new(8, 3, 1848, 576),
        "Upper COB sirens underwater right",
        stat(Stat::MaxAura),
        &g.upper_caves_of_banishment & R::SWIMMING,
    )?;
    w.add(
        ItemKey::new(8, 3, 1256, 544),
        "Upper COB sirens underwater right",
        use_item(Use::SilverOre),
        &g.upper_caves_of_banishment & R::SWIMMING,
    )?;
    w.add(
        ItemKey::new(8, 5, 88, 496),
        "Upper COB underwater hook",
        stat(Stat::MaxSand),
        &g.upper_caves_of_banishment & R::SWIMMING,
    )?;
    w.area("Castle Ramparts");
    w.add(
        ItemKey::new(4, 20, 264, 160),
        "Castle Ramparts moat cave",
        stat(Stat::MaxAura),
        &g.access_to_past,
    )?;
    w.add(
        ItemKey::new(4, 1, 456, 160),
        "Castle Ramparts bombers",
        stat(Stat::MaxSand),
        &g.castle_ramparts & &g.multiple_small_jumps_of_npc,
    )?;
    w.add(
        ItemKey::new(4, 3, 136, 144),
        "Castle Ramparts frozen engineer",
        stat(Stat::MaxHp),
        &g.castle_ramparts & Gate::any_of(R::TIME_STOP | R::FORWARD_DASH),
    )?;
    w.add(
        ItemKey::new(4, 10, 56, 192),
        "Castle Ramparts Giantess chest",
        use_item(Use::HiPotion),
        &g.castle_ramparts,
    )?;
    w.add(
        ItemKey::new(4, 11, 344, 192),
        "Castle Ramparts Knight and Archer chest",
        use_item(Use::HiPotion),
        &g.castle_ramparts,
    )?;
    w.add(
        ItemKey::new(4, 22, 104, 189),
        "Castle Ramparts pedestal",
        orb(Orb::Iron, Slot::Melee),
        &g.castle_ramparts,
    )?;
    w.area("Castle Keep");
    w.add(
        ItemKey::new(5, 9, 104, 189),
        "Castle Keep basement secret",
        orb(Orb::Blood, Slot::Melee),
        &g.castle_keep & g.oculus_rift,
    )?;
    w.add(
        ItemKey::new(5, 10, 104, 192),
        "Castle Keep basement by secret",
        familiar(Familiar::Sprite),
        &g.castle_keep,
    )?;
    w.add(
        ItemKey::new(5, 14, 88, 208),
        "Aelana's room",
        use_item(Use::MagicMarbles),
        &g.castle_keep & R::PINK_ORB & R::DOUBLE_JUMP,
    )?;
    w.add(
        ItemKey::new(5, 44, 216, 192),
        "Castle Keep basement Giantess",
        use_item(Use::Potion),
        &g.castle_keep,
    )?;
    w.add(
        ItemKey::new(5, 45, 104, 192),
        "Castle Keep basement Eggs and Arrows",
        stat(Stat::MaxHp),
        &g.castle_keep,
    )?;
    w.add(
        ItemKey::new(5, 15, 296, 192),
        "Castle Keep basement solo egg",
        stat(Stat::MaxAura),
        &g.castle_keep,
    )?;
    w.add(
        ItemKey::new(5, 41, 72, 160),
        "Chest under the Golden Idol",
        equipment(Equip::BuckleHat),
        &g.castle_keep,
    )?;
    w.add(
        ItemKey::new(5, 20, 504, 48),
        "Castle Keep Royal Advisor ledge",
        None,
        &g.castle_keep & R::TIME_STOP,
    )?;
    w.add(
        ItemKey::new(5, 22, 312, 176),
        "Castle Keep Royal Guard room",
        stat(Stat::MaxSand),
        &g.castle_keep & ((R::TIME_STOP & R::FORWARD_DASH) | R::DOUBLE_JUMP),
    )?;
    w.add(
        ItemKey::room(5, 5),
        "Golden Idol",
        relic(Relic::DoubleJump),
        &g.castle_keep & R::TIME_STOP,
    )?;
    w.area("Royal Towers");
    w.add(
        ItemKey::new(6, 19, 200, 176),
        "Royal Towers secret",
        stat(Stat::MaxAura),
        &g.royal_tower & R::DOUBLE_JUMP & g.oculus_rift,
    )?;
    w.add(
        ItemKey::new(6, 27, 472, 384),
        "Royal Towers above the secret",
        use_item(Use::MagicMarbles),
        &g.mid_royal_tower,
    )?;
    w.add(
        ItemKey::new(6, 1, 1512, 288),
        "Royal Courtyard",
        use_item(Use::Potion),
        &g.mid_royal_tower,
    )?;
    w.add(
        ItemKey::new(6, 25, 360, 176),
        "Royal Courtyard Tower right chest",
        use_item(Use::HiEther),
        &g.upper_royal_tower & &g.double_jump_of_npc,
    )?;
    w.add(
        ItemKey::new(6, 3, 120, 208),
        "Royal Courtyard Tower top",
        familiar(Familiar::Demon),
        &g.upper_royal_tower & &g.double_jump_of_npc,
    )?;
    w.add(
        ItemKey::new(6, 17, 200, 112),
        "Right Royal Tower pinnacle",
        stat(Stat::MaxHp),
        &g.upper_royal_tower & &g.double_jump_of_npc,
    )?;
    w.add(
        ItemKey::new(6, 17, 56, 448),
        "Right Royal Tower chest below pinnacle",
        equipment(Equip::VileteCrown),
        &g.upper_royal_tower,
    )?;
    w.add(
        ItemKey::new(6, 17, 360, 1840),
        "Right Royal Tower bottom",
        equipment(Equip::MidnightCloak),
        &g.mid_royal_tower,
    )?;
    w.add(
        ItemKey::new(6, 13, 120, 176),
        "Left Royal Tower balcony",
        stat(Stat::MaxSand),
        &g.upper_royal_tower,
    )?;
    w.add(
        ItemKey::new(6, 22, 88, 208),
        "Left Royal Tower Royal Guard",
        use_item(Use::Ether),
        &g.upper_royal_tower,
    )?;
    w.add(
        ItemKey::new(6, 11, 360, 544),
        "Before Aelana",
        use_item(Use::HiPotion),
        &g.upper_royal_tower,
    )?;
    w.add(
        ItemKey::new(6, 23, 856, 208),
        "Aelana's attic",
        equipment(Equip::VileteDress),
        &g.upper_royal_tower & R::UPWARD_DASH,
    )?;
    w.add(
        ItemKey::new(6, 14, 136, 208),
        "Aelana's chest",
        orb(Orb::Pink, Slot::Melee),
        &g.upper_royal_tower,
    )?;
    w.add(
        ItemKey::new(6, 14, 184, 205),
        "Aelana's pedestal",
        use_item(Use::WarpCard),
        &g.upper_royal_tower,
    )?;

    Ok(())
}

fn pyramid<P: ItemProvider + ?Sized>(w: &mut World<'_, P>, g: &WorldGates) -> Result<()> {
    w.area("Ancient Pyramid");
    w.add(
        ItemKey::new(16, 14, 312, 192),
        "Pyramid entrance freebie",
        stat(Stat::MaxSand),
        &g.left_pyramid,
    )?;
    w.add(
        ItemKey::new(16, 3, 88, 192),
        "Pyramid behind Conviction",
        stat(Stat::MaxHp),
        &g.left_pyramid,
    )?;
    w.add(
        ItemKey::new(16, 22, 200, 192),
        "Pyramid secret",
        stat(Stat::MaxAura),
        &g.left_pyramid & g.oculus_rift,
    )?;
    w.add(
        ItemKey::new(16, 16, 1512, 144),
        "Pyramid secret secret",
        relic(Relic::EssenceOfSpace),
        &g.left_pyramid & g.oculus_rift,
    )?;
    w.add(
        ItemKey::new(16, 5, 136, 192),
        "At Sandman's Door",
        equipment(Equip::SelenBangle),
        &g.nightmare,
    )?;

    Ok(())
}

fn temporal_gyre<P: ItemProvider + ?Sized>(w: &mut World<'_, P>, g: &WorldGates) -> Result<()> {
    w.area("Temporal Gyre");
    w.add(ItemKey::new(14, 14, 200, 832), "Gyre Chest 1", None, &g.temporal_gyre)?;
    w.add(ItemKey::new(14, 17, 200, 832), "Gyre Chest 2", None, &g.temporal_gyre)?;
    w.add(ItemKey::new(14, 20, 200, 832), "Gyre Chest 3", None, &g.temporal_gyre)?;
    w.add(ItemKey::new(14, 8, 120, 176), "Ravenlord Entry", None, &g.ravenlords_lair)?;
    w.add(ItemKey::new(14, 9, 200, 125), "Ravenlord Pedestal", None, &g.ravenlords_lair)?;
    w.add(ItemKey::new(14, 9, 280, 176), "Ravenlord Exit", None, &g.ravenlords_lair)?;
    w.add(ItemKey::new(14, 6, 40, 208), "Ifrit Entry", None, &g.ifrits_lair)?;
    w.add(ItemKey::new(14, 7, 200, 205), "Ifrit Pedestal", None, &g.ifrits_lair)?;
    w.add(ItemKey::new(14, 7, 280, 208), "Ifrit Exit", None, &g.ifrits_lair)?;

    Ok(())
}

fn terminals<P: ItemProvider + ?Sized>(w: &mut World<'_, P>, g: &WorldGates) -> Result<()> {
    w.area("Library");
    w.add(ItemKey::new(2, 44, 792, 592), "Library terminal 1", None, &g.left_library & R::TABLET)?;
    w.add(ItemKey::new(2, 44, 120, 368), "Library terminal 2", None, &g.left_library & R::TABLET)?;
    w.add(ItemKey::new(2, 44, 456, 368), "Library terminal 3", None, &g.left_library & R::TABLET)?;
    w.add(
        ItemKey::new(2, 58, 152, 208),
        "V terminal 1",
        None,
        &g.left_library & R::TABLET & R::CARD_V,
    )?;
    w.add(
        ItemKey::new(2, 58, 232, 208),
        "V terminal 2",
        None,
        &g.left_library & R::TABLET & R::CARD_V,
    )?;
    w.add(
        ItemKey::new(2, 58, 312, 208),
        "V terminal 3",
        None,
        &g.left_library & R::TABLET & R::CARD_V,
    )?;
    w.area("Library Top");
    w.add(
        ItemKey::new(2, 44, 568, 176),
        "Terminal under Backer room",
        None,
        &g.upper_left_library & R::TABLET,
    )?;
    w.area("Varndagroth Tower Right");
    w.add(
        ItemKey::new(2, 18, 200, 192),
        "Varndagray terminal",
        None,
        &g.right_side_library_elevator & R::CARD_B & R::TABLET,
    )?;
    w.area("The Lab");
    w.add(
        ItemKey::new(11, 6, 200, 192),
        "Lab terminal and chest room terminal",
        None,
        &g.upper_lab & R::TABLET,
    )?;
    w.add(
        ItemKey::new(11, 16, 600, 192),
        "Sentry platform terminal",
        None,
        &g.the_lab_powered_off & R::TABLET,
    )?;
    w.add(
        ItemKey::new(11, 34, 200, 192),
        "Lab terminal by Experiment 13",
        None,
        &g.the_lab & R::TABLET,
    )?;
    w.add(
        ItemKey::new(11, 37, 200, 192),
        "Lab Bottom terminal left",
        None,
        &g.the_lab & R::TABLET,
    )?;
    w.add(
        ItemKey::new(11, 15, 152, 176),
        "Lab Bottom terminal middle",
        None,
        &g.the_lab_powered_off & R::TABLET,
    )?;
    w.add(
        ItemKey::new(11, 38, 120, 176),
        "Lab Bottom terminal right",
        None,
        &g.the_lab_powered_off & R::TABLET,
    )?;

    Ok(())
}

fn cantoran<P: ItemProvider + ?Sized>(w: &mut World<'_, P>, g: &WorldGates) -> Result<()> {
    w.area("Upper Lake Serene");
    w.add(
        ItemKey::room(7, 5),
        "Cantoran",
        orb(Orb::Barrier, Slot::Melee),
        &g.left_side_forest_caves,
    )?;

    Ok(())
}

fn lore<P: ItemProvider + ?Sized>(w: &mut World<'_, P>, g: &WorldGates) -> Result<()> {
    w.area("Lake Desolation");
    w.add(
        ItemKey::new(1, 10, 312, 81),
        "Lake Desolation memory (Time Messenger)",
        None,
        &g.lower_lake_desolation_bridge,
    )?;
    w.area("Library");
    w.add(
        ItemKey::new(2, 5, 200, 145),
        "Library Waterway memory (A Message)",
        None,
        &g.left_library,
    )?;
    w.add(
        ItemKey::new(2, 45, 344, 145),
        "Library under Backer room memory (Lachiemi Sun)",
        None,
        &g.upper_left_library,
    )?;
    w.add(
        ItemKey::new(2, 51, 88, 177),
        "Library Backer room memory (Moonlit Night)",
        None,
        &g.upper_left_library,
    )?;
    w.area("Varndagroth Tower Left");
    w.add(
        ItemKey::new(2, 25, 216, 145),
        "Left Varndagray Tower memory (Nomads)",
        None,
        &g.mid_library & R::CARD_E,
    )?;
    w.area("Varndagroth Tower Right");
    w.add(
        ItemKey::new(2, 46, 200, 145),
        "Varndagray Sealed Caves elevator memory (Childhood)",
        None,
        &g.mid_library & R::CARD_B,
    )?;
    w.add(
        ItemKey::new(2, 11, 200, 161),
        "Right Varndagray bottom memory (Faron)",
        None,
        &g.lower_right_side_library,
    )?;
    w.area("Military Hangar");
    w.add(
        ItemKey::new(10, 3, 536, 97),
        "Military Hangar memory (A Solution)",
        None,
        &g.military_fortress & &g.double_jump_of_npc & R::TIMESPINNER_WHEEL,
    )?;
    w.area("The Lab");
    w.add(
        ItemKey::new(11, 7, 248, 129),
        "Lab trash secret memory 1 (An Old Friend)",
        None,
        &g.the_lab & g.oculus_rift,
    )?;
    w.add(
        ItemKey::new(11, 7, 296, 129),
        "Lab trash secret memory 2 (Twilight Dinner)",
        None,
        &g.the_lab & g.oculus_rift,
    )?;
    w.area("Emperor's Tower");
    w.add(
        ItemKey::new(12, 19, 56, 145),
        "Right Emperor's Tower top memory (Final Circle)",
        None,
        &g.emperors_tower & &g.double_jump_of_npc,
    )?;
    w.area("Forest");
    w.add(
        ItemKey::new(3, 12, 472, 161),
        "Forest three-way letter (Lachiem Expedition)",
        None,
        &g.access_to_past,
    )?;
    w.add(
        ItemKey::new(3, 15, 328, 97),
        "Forest banishment overhang letter (Peace Treaty)",
        None,
        &g.access_to_past
            & (&g.double_jump_of_npc
                | &g.forward_dash_double_jump
                | (R::TIME_STOP & R::FORWARD_DASH)),
    )?;
    w.area("Castle Ramparts");
    w.add(
        ItemKey::new(4, 18, 456, 497),
        "Ramparts moat letter (Prime Edicts)",
        None,
        &g.castle_ramparts,
    )?;
    w.add(
        ItemKey::new(4, 11, 360, 161),
        "Ramparts Knight and Archer letter (Declaration of Independence)",
        None,
        &g.castle_ramparts,
    )?;
    w.area("Castle Keep");
    w.add(
        ItemKey::new(5, 41, 184, 177),
        "Letter under the Golden Idol (Letter of Reference)",
        None,
        &g.castle_keep,
    )?;
    w.add(
        ItemKey::new(5, 44, 264, 161),
        "Keep basement Giantess letter (Political Advice)",
        None,
        &g.castle_keep,
    )?;
    w.add(
        ItemKey::new(5, 14, 568, 177),
        "Aelana's room letter (Diplomatic Missive)",
        None,
        &g.castle_keep & R::PINK_ORB & R::DOUBLE_JUMP,
    )?;
    w.area("Royal Towers");
    w.add(
        ItemKey::new(6, 17, 344, 433),
        "Right Royal Tower letter below pinnacle (War of the Sisters)",
        None,
        &g.upper_royal_tower,
    )?;
    w.add(
        ItemKey::new(6, 14, 136, 177),
        "Letter beyond Aelana (Stained Letter)",
        None,
        &g.upper_royal_tower,
    )?;
    w.add(
        ItemKey::new(6, 25, 152, 145),
        "Royal Courtyard letter (Mission Findings)",
        None,
        &g.upper_royal_tower & &g.double_jump_of_npc,
    )?;
    w.area("Caves of Banishment (Maw)");
    w.add(
        ItemKey::new(8, 36, 136, 145),
        "Caves of Banishment letter (Naïvety)",
        None,
        &g.lower_caves_of_banishment,
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::{ItemInfoProvider, ItemUnlockingMap};
    use crate::seed::Seed;

    fn build(options: SeedOptions) -> ItemLocationMap {
        let unlocking_map =
            ItemUnlockingMap::with_pyramid_keys_unlock(Seed::new(3), R::GATE_CASTLE_KEEP);
        let provider = ItemInfoProvider::new(options, unlocking_map);
        ItemLocationMap::new(&provider, unlocking_map, options).unwrap()
    }

    fn everything() -> SeedOptions {
        SeedOptions {
            gyre_archives: true,
            downloadable_items: true,
            cantoran: true,
            lore_checks: true,
            start_with_talaria: true,
            ..SeedOptions::default()
        }
    }

    #[test]
    fn base_world_has_every_location() {
        let options = SeedOptions::default();
        let map = build(options);
        assert_eq!(map.len(), BASE_LOCATIONS);
        assert_eq!(map.len(), expected_location_count(&options));
    }

    #[test]
    fn optional_groups_match_the_expected_count() {
        let options = everything();
        let map = build(options);
        assert_eq!(map.len(), expected_location_count(&options));
        assert_eq!(map.len(), 166 + 1 + 14 + 9 + 1 + 22);
    }

    #[test]
    fn every_location_opens_with_everything_held() {
        let map = build(everything());
        assert_eq!(map.reachable(R::ALL).count(), map.len());
    }

    #[test]
    fn only_the_start_is_open_with_nothing_held() {
        let map = build(SeedOptions::default());
        let keys: Vec<_> = map.reachable(R::NONE).map(|l| l.key).collect();
        assert_eq!(
            keys,
            vec![
                ItemKey::TUTORIAL_MELEE_ORB,
                ItemKey::TUTORIAL_SPELL_ORB,
                ItemKey::new(1, 1, 1528, 144),
                ItemKey::new(1, 15, 264, 144),
                ItemKey::new(1, 25, 296, 176),
                ItemKey::new(1, 9, 600, 162),
            ]
        );
    }

    #[test]
    fn inverted_seeds_start_in_the_past() {
        let gates = WorldGates::new(&SeedOptions {
            inverted: true,
            ..SeedOptions::default()
        });
        assert!(gates.access_to_past.satisfied_by(R::NONE));
        assert!(!gates.access_to_lake_desolation.satisfied_by(R::NONE));
        assert!(gates
            .access_to_lake_desolation
            .satisfied_by(R::GATE_MILITARY_GATE | R::CARD_B));
        assert!(!gates
            .access_to_lake_desolation
            .satisfied_by(R::GATE_MILITARY_GATE | R::CARD_A));
    }

    #[test]
    fn past_needs_the_library_timespinner_or_a_teleporter() {
        let gates = WorldGates::new(&SeedOptions::default());
        let timespinner = R::TIMESPINNER_WHEEL | R::TIMESPINNER_SPINDLE | R::CARD_D;

        assert!(!gates.access_to_past.satisfied_by(timespinner));
        assert!(gates.access_to_past.satisfied_by(timespinner | R::TIME_STOP));
        assert!(gates.access_to_past.satisfied_by(R::GATE_CASTLE_KEEP));
        assert!(gates.access_to_past.satisfied_by(R::GATE_MAW));
        assert!(!gates.access_to_past.satisfied_by(R::TIMESPINNER_WHEEL | R::CARD_D));
    }

    #[test]
    fn gas_mask_option_closes_the_maw() {
        let plain = WorldGates::new(&SeedOptions::default());
        let gassed = WorldGates::new(&SeedOptions {
            gass_maw: true,
            ..SeedOptions::default()
        });

        assert!(plain.kill_maw.satisfied_by(R::GATE_MAW));
        assert!(!gassed.kill_maw.satisfied_by(R::GATE_MAW));
        assert!(gassed.kill_maw.satisfied_by(R::GATE_MAW | R::GASS_MASK));
        assert!(!gassed.access_to_past.satisfied_by(R::GATE_MAW));
    }

    #[test]
    fn eye_ring_option_guards_secret_rooms() {
        let secret = ItemKey::new(1, 11, 72, 240);
        let held = R::FORWARD_DASH;

        let map = build(SeedOptions::default());
        assert!(map.get(secret).unwrap().gate.satisfied_by(held));

        let map = build(SeedOptions {
            require_eye_orb_ring: true,
            ..SeedOptions::default()
        });
        let gate = &map.get(secret).unwrap().gate;
        assert!(!gate.satisfied_by(held));
        assert!(gate.satisfied_by(held | R::OCULUS_RIFT));
    }

    #[test]
    fn talaria_starts_collected() {
        let map = build(everything());
        let talaria = map.get(ItemKey::EXTERNAL_START).unwrap();
        assert!(talaria.picked_up);
        assert_eq!(
            talaria.item.as_ref().map(|item| item.possible_unlocks()),
            Some(R::FORWARD_DASH)
        );
    }

    #[test]
    fn vanilla_items_are_resolved_through_the_provider() {
        let map = build(SeedOptions::default());
        let idol = map.get(ItemKey::new(5, 5, 40, 40)).unwrap();
        assert_eq!(idol.name, "Golden Idol");
        assert_eq!(
            idol.item.as_ref().map(|item| item.identifier()),
            Some(ItemIdentifier::Relic(Relic::DoubleJump))
        );
        assert!(map.get(ItemKey::new(7, 3, 120, 204)).unwrap().item.is_none());
    }
}
