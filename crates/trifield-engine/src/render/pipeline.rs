use std::collections::BTreeMap;

use naga::valid::{Capabilities, ValidationFlags, Validator};
use naga::{AddressSpace, Binding, Handle, ResourceBinding, ShaderStage, Type, TypeInner, VectorSize};

use super::common::{
    color_layout, position_layout, transform_ubo_min_binding_size, COLOR_LOCATION,
    POSITION_LOCATION, TRANSFORM_BINDING, TRANSFORM_GROUP,
};
use super::RenderError;

pub const VERTEX_ENTRY: &str = "vs_main";
pub const FRAGMENT_ENTRY: &str = "fs_main";

/// Built-in triangle field shader.
pub const TRIANGLE_SHADER: &str = include_str!("shaders/triangles.wgsl");

/// Slots the buffers and the transform uniform bind against.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct PipelineHandles {
    pub position_location: u32,
    pub color_location: u32,
    pub transform_group: u32,
    pub transform_binding: u32,
}

/// Compiled render program for the triangle field.
///
/// The WGSL source is parsed and validated with naga first, so a broken
/// shader is reported with its diagnostics instead of surfacing later as a
/// device validation failure. The stage interface is then "linked": entry
/// points, vertex attributes, varyings and the transform uniform are checked
/// against what the renderer binds.
pub struct ShaderPipeline {
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    handles: PipelineHandles,
}

impl ShaderPipeline {
    /// Compiles the built-in shader for `surface_format`.
    pub fn compile(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
    ) -> Result<Self, RenderError> {
        Self::compile_source(device, surface_format, "triangles", TRIANGLE_SHADER)
    }

    /// Compiles arbitrary WGSL against the triangle pipeline contract.
    pub fn compile_source(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        label: &str,
        source: &str,
    ) -> Result<Self, RenderError> {
        let handles = check_program(label, source)?;

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Wgsl(source.into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("trifield transform bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: handles.transform_binding,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: transform_ubo_min_binding_size(),
                },
                count: None,
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("trifield pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("trifield pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some(VERTEX_ENTRY),
                compilation_options: Default::default(),
                // Slot 0: positions, slot 1: colors. Separate buffers, no interleaving.
                buffers: &[position_layout(), color_layout()],
            },

            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some(FRAGMENT_ENTRY),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                // Random vertex order: both windings must be visible.
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        log::debug!("compiled shader pipeline `{label}` for {surface_format:?}");

        Ok(Self {
            pipeline,
            bind_group_layout,
            handles,
        })
    }

    #[inline]
    pub fn handles(&self) -> PipelineHandles {
        self.handles
    }

    #[inline]
    pub(super) fn pipeline(&self) -> &wgpu::RenderPipeline {
        &self.pipeline
    }

    #[inline]
    pub(super) fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout
    }
}

/// Compiles and links `source` without a device.
pub fn check_program(label: &str, source: &str) -> Result<PipelineHandles, RenderError> {
    let module = compile_module(label, source)?;
    link(label, &module)
}

fn compile_module(label: &str, source: &str) -> Result<naga::Module, RenderError> {
    let compile_error = |log: String| RenderError::ShaderCompile {
        label: label.to_string(),
        log,
    };

    let module = naga::front::wgsl::parse_str(source)
        .map_err(|e| compile_error(e.emit_to_string(source)))?;

    Validator::new(ValidationFlags::all(), Capabilities::empty())
        .validate(&module)
        .map_err(|e| compile_error(e.emit_to_string(source)))?;

    Ok(module)
}

type Locations = BTreeMap<u32, Handle<Type>>;

fn link(label: &str, module: &naga::Module) -> Result<PipelineHandles, RenderError> {
    let fail = |reason: String| RenderError::ProgramLink {
        label: label.to_string(),
        reason,
    };

    let entry = |name: &str, stage: ShaderStage| {
        module
            .entry_points
            .iter()
            .find(|ep| ep.name == name && ep.stage == stage)
            .ok_or_else(|| fail(format!("missing {stage:?} entry point `{name}`")))
    };
    let vs = entry(VERTEX_ENTRY, ShaderStage::Vertex)?;
    let fs = entry(FRAGMENT_ENTRY, ShaderStage::Fragment)?;

    let mut vs_inputs = Locations::new();
    for arg in &vs.function.arguments {
        collect_locations(module, arg.ty, arg.binding.as_ref(), &mut vs_inputs);
    }

    let mut vs_outputs = Locations::new();
    if let Some(result) = &vs.function.result {
        collect_locations(module, result.ty, result.binding.as_ref(), &mut vs_outputs);
    }

    let mut fs_inputs = Locations::new();
    for arg in &fs.function.arguments {
        collect_locations(module, arg.ty, arg.binding.as_ref(), &mut fs_inputs);
    }

    for (location, ty) in &fs_inputs {
        let Some(out_ty) = vs_outputs.get(location) else {
            return Err(fail(format!(
                "fragment input @location({location}) is not written by the vertex stage"
            )));
        };
        if module.types[*out_ty].inner != module.types[*ty].inner {
            return Err(fail(format!(
                "@location({location}) type differs between vertex output and fragment input"
            )));
        }
    }

    expect_f32_vector(module, &vs_inputs, POSITION_LOCATION, VectorSize::Bi, "position")
        .map_err(fail)?;
    expect_f32_vector(module, &vs_inputs, COLOR_LOCATION, VectorSize::Tri, "color")
        .map_err(fail)?;

    let transform_slot = ResourceBinding {
        group: TRANSFORM_GROUP,
        binding: TRANSFORM_BINDING,
    };
    let has_transform = module
        .global_variables
        .iter()
        .any(|(_, var)| var.space == AddressSpace::Uniform && var.binding == Some(transform_slot));
    if !has_transform {
        return Err(fail(format!(
            "no uniform at @group({TRANSFORM_GROUP}) @binding({TRANSFORM_BINDING})"
        )));
    }

    Ok(PipelineHandles {
        position_location: POSITION_LOCATION,
        color_location: COLOR_LOCATION,
        transform_group: TRANSFORM_GROUP,
        transform_binding: TRANSFORM_BINDING,
    })
}

/// Records user-defined `@location` bindings, flattening struct arguments.
fn collect_locations(
    module: &naga::Module,
    ty: Handle<Type>,
    binding: Option<&Binding>,
    out: &mut Locations,
) {
    match binding {
        Some(Binding::Location { location, .. }) => {
            out.insert(*location, ty);
        }
        Some(_) => {}
        None => {
            if let TypeInner::Struct { members, .. } = &module.types[ty].inner {
                for member in members {
                    collect_locations(module, member.ty, member.binding.as_ref(), out);
                }
            }
        }
    }
}

fn expect_f32_vector(
    module: &naga::Module,
    inputs: &Locations,
    location: u32,
    size: VectorSize,
    name: &str,
) -> Result<(), String> {
    let Some(ty) = inputs.get(&location) else {
        return Err(format!("vertex stage has no {name} attribute at @location({location})"));
    };

    match &module.types[*ty].inner {
        TypeInner::Vector { size: s, scalar } if *s == size && *scalar == naga::Scalar::F32 => {
            Ok(())
        }
        other => Err(format!(
            "{name} attribute at @location({location}) is {other:?}, expected a {} component f32 vector",
            size as u8
        )),
    }
}
