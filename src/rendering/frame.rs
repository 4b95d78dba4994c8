use crate::{
    camera::VsConstants,
    rendering::{
        cube::CUBE_INDEX_COUNT,
        device::{ClearValues, DrawIndexedAttribs, GraphicsDevice, RenderContext},
        instance::INSTANCE_COUNT,
        resources::InstancingResources,
    },
    scene::InstanceScene,
};

pub fn linear_to_srgb(linear: f32) -> f32 {
    if linear <= 0.0031308 {
        linear * 12.92
    } else {
        1.055 * linear.powf(1.0 / 2.4) - 0.055
    }
}

/// Alpha stays linear.
pub fn linear_to_srgb_color([r, g, b, a]: [f32; 4]) -> [f32; 4] {
    [linear_to_srgb(r), linear_to_srgb(g), linear_to_srgb(b), a]
}

impl<D: GraphicsDevice> InstancingResources<D> {
    pub fn render<C: RenderContext<D>>(
        &self,
        context: &mut C,
        scene: &InstanceScene,
        constants: &VsConstants,
        clear_color: [f32; 4],
    ) -> anyhow::Result<()> {
        let instances = scene.instances();
        context.update_buffer(&self.instance_buffer, bytemuck::cast_slice(&instances));

        let color = if self.convert_output_to_gamma {
            linear_to_srgb_color(clear_color)
        } else {
            clear_color
        };
        context.clear(ClearValues { color, depth: 1.0 });

        context.update_buffer(&self.vs_constants, bytemuck::bytes_of(constants));

        context.set_vertex_buffers(&[&self.cube_vertices, &self.instance_buffer]);
        context.set_index_buffer(&self.cube_indices);

        context.set_pipeline(&self.pipeline);
        context.commit_bindings(&self.bindings);

        context.draw_indexed(DrawIndexedAttribs {
            num_indices: CUBE_INDEX_COUNT,
            num_instances: INSTANCE_COUNT as u32,
        })
    }
}
