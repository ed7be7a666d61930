// Sat Oct 17 2026 - Alex

use super::args::{Args, BlockArgs, Command, DumpArgs, EditArgs, ListArgs};
use crate::config::RenderingConfig;
use crate::memory::{Address, BufferMemory, MemoryBlock, MemorySource};
use crate::rendering::{ManifestSource, RenderingContext, SharedRenderer};
use crate::ui::display::TableDisplay;
use crate::utils::logging::{effective_level, LoggingUtils};
use crate::utils::{format_bytes, pluralize};
use anyhow::{anyhow, Context};
use colored::Colorize;
use std::path::PathBuf;

pub struct CommandHandler {
    use_color: bool,
}

struct LoadedBlock {
    memory: BufferMemory,
    block: MemoryBlock,
}

impl CommandHandler {
    pub fn new() -> Self {
        Self { use_color: true }
    }

    pub fn execute(&mut self, args: Args) -> anyhow::Result<()> {
        LoggingUtils::init(effective_level(&args.log_level, args.verbose));
        self.use_color = !args.no_color;
        if args.no_color {
            colored::control::set_override(false);
        }

        let config = match &args.config {
            Some(path) => RenderingConfig::from_file(path)
                .with_context(|| format!("Failed to load configuration {:?}", path))?,
            None => RenderingConfig::default(),
        };
        let mut context = RenderingContext::new(config)?;
        if let Some(path) = &args.manifest {
            let source = ManifestSource::from_file(path)?;
            let added = context.registry_mut().load_from(&source)?;
            log::info!("Loaded {} from {:?}", pluralize(added, "rendering", "renderings"), path);
        }

        let result = match args.command {
            Command::Dump(dump_args) => self.handle_dump(&mut context, dump_args),
            Command::Edit(edit_args) => self.handle_edit(&mut context, edit_args),
            Command::List(list_args) => self.handle_list(&context, list_args),
        };
        context.shutdown();
        result
    }

    fn load_block(&self, context: &RenderingContext, args: &BlockArgs) -> anyhow::Result<LoadedBlock> {
        args.validate().map_err(|e| anyhow!(e))?;
        let base = Address::parse(&args.base)?;
        let config = context.config();

        let mut memory = BufferMemory::load(&args.file, base.clone())?
            .with_addressable_size(config.default_addressable_size);
        if let Some(endianness) = args.endianness {
            memory = memory.with_endianness(endianness);
        }

        let name = args
            .file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "memory".to_string());
        let mut block = MemoryBlock::new(name, base)
            .with_length(memory.len() as u64)
            .with_addressable_size(config.default_addressable_size)
            .with_address_size(args.address_size);
        if let Some(endianness) = args.endianness {
            block = block.with_endianness(endianness);
        }
        log::debug!("Loaded {} ({})", block, format_bytes(memory.len() as u64));
        Ok(LoadedBlock { memory, block })
    }

    fn open(&self, context: &mut RenderingContext, block: &MemoryBlock, id: &str, column_units: Option<usize>) -> anyhow::Result<SharedRenderer> {
        let renderer = context
            .create_rendering(block, id)?
            .ok_or_else(|| anyhow!("Rendering {} is not available for {}", id, block))?;
        if let Some(units) = column_units {
            renderer.lock().set_column_units(units)?;
        }
        Ok(renderer)
    }

    fn handle_dump(&self, context: &mut RenderingContext, args: DumpArgs) -> anyhow::Result<()> {
        args.validate().map_err(|e| anyhow!(e))?;
        let loaded = self.load_block(context, &args.block)?;
        let renderer = self.open(context, &loaded.block, &args.rendering, args.column_units)?;
        let renderer = renderer.lock();

        let base = loaded.block.base().clone();
        let requested = match &args.address {
            Some(text) => Address::parse(text)?,
            None => base.clone(),
        };
        let start = renderer
            .layout()
            .line_start(&requested, &base)
            .ok_or_else(|| anyhow!("Address {} is below the base {}", requested, base))?;

        let units = (args.length + loaded.block.addressable_size() - 1) / loaded.block.addressable_size();
        let fetched = loaded.memory.fetch(&start, units)?;
        if !fetched.status.is_complete() {
            log::warn!("Some bytes at {} could not be read", start);
        }
        let mut window = fetched.window;
        if let Some(path) = &args.compare {
            let previous = BufferMemory::load(path, base.clone())?
                .with_addressable_size(loaded.block.addressable_size())
                .fetch(&start, units)?
                .window;
            window = window.with_changes_from(&previous);
        }

        let lines = renderer.render_table(&window)?;
        let selected = args
            .address
            .as_ref()
            .and_then(|_| renderer.layout().position_of(&requested, &base))
            .map(|p| renderer.layout().address_of(p.row, p.column, &base));
        let display = TableDisplay::new().with_color(self.use_color).with_selected(selected);

        println!(
            "{} {} as {} ({})",
            "[*]".blue(),
            loaded.block.name(),
            renderer.rendering_id(),
            renderer.endianness_for(&window)
        );
        print!("{}", display.render(&renderer.column_labels(), &lines));
        Ok(())
    }

    fn handle_edit(&self, context: &mut RenderingContext, args: EditArgs) -> anyhow::Result<()> {
        args.validate().map_err(|e| anyhow!(e))?;
        let loaded = self.load_block(context, &args.block)?;
        let renderer = self.open(context, &loaded.block, &args.rendering, args.column_units)?;
        let renderer = renderer.lock();

        let base = loaded.block.base().clone();
        let address = Address::parse(&args.address)?;
        let layout = *renderer.layout();
        let position = layout
            .position_of(&address, &base)
            .ok_or_else(|| anyhow!("Address {} is below the base {}", address, base))?;
        let line = layout.address_of(position.row, 0, &base);
        let window = loaded
            .memory
            .fetch(&line, layout.units_per_line())?
            .window;

        let outcome = match renderer.edit_cell(&window, 0, position.column, &args.text)? {
            Some(outcome) => outcome,
            None => return Ok(()),
        };
        if !outcome.has_changes() {
            println!("{} Value unchanged at {}", "[=]".yellow(), outcome.address());
            return Ok(());
        }

        let written = renderer.commit(&outcome, &loaded.memory)?;
        for change in outcome.changes() {
            let old = change.old.map_or_else(|| "??".to_string(), |b| format!("{:02X}", b));
            println!("  {}  {} -> {:02X}", renderer.address_label(&change.address), old, change.new);
        }

        let target: PathBuf = args.output.clone().unwrap_or_else(|| args.block.file.clone());
        loaded.memory.save(&target)?;
        println!(
            "{} Wrote {} to {:?}",
            "[+]".green(),
            pluralize(written, "byte", "bytes"),
            target
        );
        Ok(())
    }

    fn handle_list(&self, context: &RenderingContext, args: ListArgs) -> anyhow::Result<()> {
        let registry = context.registry();
        let descriptors: Vec<_> = match &args.view {
            Some(view) => registry.descriptors_for_view(view).collect(),
            None => registry.descriptors().collect(),
        };

        println!("{}", "Renderings".cyan().bold());
        for descriptor in descriptors {
            let mut views = if descriptor.supported_view_ids.is_empty() {
                "any view".to_string()
            } else {
                descriptor.supported_view_ids.join(", ")
            };
            if registry.is_dynamic_parent(&descriptor.id) {
                views.push_str(" (family)");
            }
            println!("  {:<18} {:<20} {}", descriptor.id.green(), descriptor.display_name, views.dimmed());
        }

        let sample = MemoryBlock::new("sample", Address::zero()).with_addressable_size(args.addressable_size.max(1));
        let dynamic = registry.dynamic_types(&sample);
        if !dynamic.is_empty() {
            println!("{}", "Dynamic".cyan().bold());
            for (parent, id) in dynamic {
                println!("  {:<18} from {}", id.green(), parent);
            }
        }
        Ok(())
    }
}

impl Default for CommandHandler {
    fn default() -> Self {
        Self::new()
    }
}
