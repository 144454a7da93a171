use std::error::Error;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use log::info;

use tsrando_core::solver::{available_from_picked_up, obtain_to_fixed_point};
use tsrando_core::{
    check_completion, progression_chain, GameSave, ItemInfoProvider, ItemLocationMap,
    ItemUnlockingMap, Placement, Requirement, Seed, SeedOptions,
};

#[derive(Debug, Parser)]
#[command(name = "tsrando", version, about = "Timespinner randomiser logic checker")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check a placement: progression waves, completion verdict and what a
    /// save currently has access to.
    Analyze {
        #[command(flatten)]
        world: WorldArgs,

        /// JSON placement (location key -> item). Vanilla items when omitted.
        #[arg(long, value_name = "FILE")]
        placement: Option<PathBuf>,

        /// JSON save snapshot with the collected location keys.
        #[arg(long, value_name = "FILE")]
        save: Option<PathBuf>,

        /// Print the resulting placement as JSON, every location included.
        #[arg(long)]
        dump_placement: bool,
    },
    /// List the locations whose gate opens with a held set.
    Reachable {
        #[command(flatten)]
        world: WorldArgs,

        #[arg(long, value_name = "FILE")]
        placement: Option<PathBuf>,

        /// Capabilities held, e.g. "TimeStop|ForwardDash" or "TS|FD".
        #[arg(long)]
        held: Option<Requirement>,

        /// Expand the held set with everything it leads to first.
        #[arg(long)]
        closure: bool,
    },
    /// Validate a seed string, or roll a new one.
    Seed {
        value: Option<String>,
    },
}

#[derive(Debug, Args)]
struct WorldArgs {
    /// Seed the pyramid key unlock is derived from.
    #[arg(long, default_value = "00000000")]
    seed: Seed,

    /// JSON seed options. The flags below are switched on on top of it.
    #[arg(long, value_name = "FILE")]
    options: Option<PathBuf>,

    #[arg(long)]
    inverted: bool,

    #[arg(long)]
    gyre_archives: bool,

    #[arg(long)]
    downloadable_items: bool,

    #[arg(long)]
    cantoran: bool,

    #[arg(long)]
    lore_checks: bool,

    #[arg(long)]
    start_with_talaria: bool,

    #[arg(long)]
    require_eye_orb_ring: bool,

    #[arg(long)]
    gass_maw: bool,

    #[arg(long)]
    progressive_keycards: bool,
}

impl WorldArgs {
    fn seed_options(&self) -> tsrando_core::Result<SeedOptions> {
        let mut options = match &self.options {
            Some(path) => SeedOptions::load(path)?,
            None => SeedOptions::default(),
        };

        options.inverted |= self.inverted;
        options.gyre_archives |= self.gyre_archives;
        options.downloadable_items |= self.downloadable_items;
        options.cantoran |= self.cantoran;
        options.lore_checks |= self.lore_checks;
        options.start_with_talaria |= self.start_with_talaria;
        options.require_eye_orb_ring |= self.require_eye_orb_ring;
        options.gass_maw |= self.gass_maw;
        options.progressive_keycards |= self.progressive_keycards;

        Ok(options)
    }

    fn build(&self, placement: Option<&PathBuf>) -> tsrando_core::Result<ItemLocationMap> {
        let options = self.seed_options()?;
        let unlocking_map = ItemUnlockingMap::new(self.seed, &options);
        let provider = ItemInfoProvider::new(options, unlocking_map);

        let mut map = ItemLocationMap::new(&provider, unlocking_map, options)?;
        info!(
            "[seed {}] pyramid keys unlock {}",
            self.seed,
            unlocking_map.pyramid_keys_unlock()
        );

        if let Some(path) = placement {
            Placement::load(path)?.apply(&mut map, &provider)?;
        }

        Ok(map)
    }
}

fn analyze(
    world: &WorldArgs,
    placement: Option<&PathBuf>,
    save: Option<&PathBuf>,
    dump_placement: bool,
) -> tsrando_core::Result<()> {
    let mut map = world.build(placement)?;

    let chain = progression_chain(&map);
    for (i, wave) in chain.waves().iter().enumerate() {
        println!("Wave {}:", i + 1);
        for location in wave.iter().filter_map(|key| map.get(*key)) {
            println!("  {location}");
        }
    }

    println!("Placement is {}", check_completion(&map));
    println!(
        "Everything collected gives: {}",
        obtain_to_fixed_point(&map, Requirement::NONE)
    );

    if let Some(path) = save {
        map.initialize(&GameSave::load(path)?);
        println!("Save has access to: {}", available_from_picked_up(&map));
    }

    if dump_placement {
        println!("{}", Placement::from_map(&map).to_json()?);
    }

    Ok(())
}

fn reachable(
    world: &WorldArgs,
    placement: Option<&PathBuf>,
    held: Requirement,
    closure: bool,
) -> tsrando_core::Result<()> {
    let map = world.build(placement)?;
    let held = if closure {
        obtain_to_fixed_point(&map, held)
    } else {
        held
    };

    println!("Holding: {held}");
    let mut count = 0;
    for location in map.reachable(held) {
        println!("  {location}");
        count += 1;
    }
    println!("{count} of {} locations reachable", map.len());

    Ok(())
}

fn seed(value: Option<&str>) -> Result<(), Box<dyn Error>> {
    let seed = match value {
        Some(text) => text.parse::<Seed>()?,
        None => Seed::random(),
    };
    println!("{seed}");
    Ok(())
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    match cli.command {
        Command::Analyze {
            world,
            placement,
            save,
            dump_placement,
        } => analyze(&world, placement.as_ref(), save.as_ref(), dump_placement)?,
        Command::Reachable {
            world,
            placement,
            held,
            closure,
        } => reachable(
            &world,
            placement.as_ref(),
            held.unwrap_or(Requirement::NONE),
            closure,
        )?,
        Command::Seed { value } => seed(value.as_deref())?,
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
