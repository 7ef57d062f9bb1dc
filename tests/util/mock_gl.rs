// SPDX-License-Identifier: LGPL-3.0-or-later OR MPL-2.0
// This file is a part of `coolcoobs`.
//
// `coolcoobs` is free software: you can redistribute it and/or modify it under the
// terms of either:
//
// * GNU Lesser General Public License as published by the Free Software Foundation, either
//   version 3 of the License, or (at your option) any later version.
// * Mozilla Public License as published by the Mozilla Foundation, version 2.
//
// `coolcoobs` is distributed in the hope that it will be useful, but WITHOUT ANY
// WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR
// PURPOSE. See the GNU Lesser General Public License or the Mozilla Public License for more
// details.
//
// You should have received a copy of the GNU Lesser General Public License and the Mozilla
// Public License along with `coolcoobs`. If not, see <https://www.gnu.org/licenses/>.

//! A `GpuContext` that records every call and pretends to be a GLSL compiler.

#![allow(dead_code)]

use coolcoobs::{GpuContext, ShaderStage, Vertex};

use std::cell::Cell;
use std::collections::{HashMap, HashSet};

/// A minimal position-only vertex shader.
pub const PASS_THROUGH_VERTEX: &str = "#version 330 core
layout (location = 0) in vec3 aPos;

void main() {
    gl_Position = vec4(aPos, 1.0);
}
";

/// A minimal solid-color fragment shader.
pub const SOLID_FRAGMENT: &str = "#version 330 core
out vec4 FragColor;

void main() {
    FragColor = vec4(0.25, 0.41, 0.88, 1.0);
}
";

/// A vertex shader that reads every kind of uniform.
pub const UNIFORM_VERTEX: &str = "#version 330 core
layout (location = 0) in vec3 aPos;

uniform mat4 uModel;
uniform float uScale;
uniform int uMode;
uniform bool uEnabled;

void main() {
    gl_Position = uModel * vec4(aPos * uScale, 1.0);
}
";

/// A vertex shader with a missing closing brace.
pub const BROKEN_VERTEX: &str = "#version 330 core
layout (location = 0) in vec3 aPos;

void main() {
    gl_Position = vec4(aPos, 1.0)
";

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateShader(ShaderStage, u32),
    CompileShader(u32),
    DeleteShader(u32),
    CreateProgram(u32),
    AttachShader(u32, u32),
    DetachShader(u32, u32),
    LinkProgram(u32),
    UseProgram(Option<u32>),
    DeleteProgram(u32),
    SetI32(String, i32),
    SetF32(String, f32),
    SetMat4(String, [f32; 16]),
    CreateVertexBuffer(u32),
    WriteVertices(u32, usize),
    DeleteVertexBuffer(u32),
    Clear([f32; 4]),
    Viewport(u32, u32),
    DrawTriangles(u32, u32, u32),
}

#[derive(Debug, thiserror::Error)]
#[error("mock gl: {0}")]
pub struct MockError(String);

#[derive(Debug)]
struct MockShader {
    stage: ShaderStage,
    source: String,
    compiled: bool,
}

#[derive(Debug, Default)]
struct MockProgram {
    attached: Vec<u32>,
    linked: bool,
    uniforms: HashSet<String>,
}

#[derive(Debug, Default)]
pub struct MockGl {
    next_id: u32,
    shaders: HashMap<u32, MockShader>,
    programs: HashMap<u32, MockProgram>,
    buffers: HashMap<u32, Vec<Vertex>>,
    uniform_lookups: Cell<usize>,

    /// Every mutating call, in order.
    pub calls: Vec<Call>,

    /// Make every link fail.
    pub fail_link: bool,

    /// Make vertex buffer creation fail.
    pub fail_buffers: bool,

    /// Pad compiler logs out to this many characters.
    pub log_padding: usize,
}

impl MockGl {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }

    pub fn live_shaders(&self) -> usize {
        self.shaders.len()
    }

    pub fn live_programs(&self) -> usize {
        self.programs.len()
    }

    pub fn live_buffers(&self) -> usize {
        self.buffers.len()
    }

    pub fn buffer_contents(&self, buffer: u32) -> Option<&[Vertex]> {
        self.buffers.get(&buffer).map(Vec::as_slice)
    }

    pub fn uniform_lookups(&self) -> usize {
        self.uniform_lookups.get()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.iter().filter(|call| pred(call)).count()
    }
}

fn syntax_check(source: &str) -> Result<(), String> {
    if !source.starts_with("#version") {
        return Err("0:1(1): error: missing #version directive".into());
    }

    if !source.contains("void main(") {
        return Err("0:0(0): error: no main function".into());
    }

    let mut depth = 0i32;
    for (line, text) in source.lines().enumerate() {
        for c in text.chars() {
            match c {
                '{' => depth += 1,
                '}' => depth -= 1,
                _ => {}
            }

            if depth < 0 {
                return Err(format!("{}:(1): error: syntax error, unexpected '}}'", line + 1));
            }
        }
    }

    if depth != 0 {
        return Err(format!(
            "{}(1): error: syntax error, unexpected end of file",
            source.lines().count()
        ));
    }

    Ok(())
}

fn declared_uniforms(source: &str) -> impl Iterator<Item = String> + '_ {
    source.lines().filter_map(|line| {
        let mut words = line.split_whitespace();
        if words.next()? != "uniform" {
            return None;
        }
        let _ty = words.next()?;
        Some(words.next()?.trim_end_matches(';').to_string())
    })
}

impl GpuContext for MockGl {
    type Shader = u32;
    type Program = u32;
    type UniformLocation = String;
    type VertexBuffer = u32;
    type Error = MockError;

    fn create_shader(&mut self, stage: ShaderStage) -> Result<u32, MockError> {
        let id = self.next_id();
        self.shaders.insert(
            id,
            MockShader {
                stage,
                source: String::new(),
                compiled: false,
            },
        );
        self.calls.push(Call::CreateShader(stage, id));
        Ok(id)
    }

    fn shader_source(&mut self, shader: u32, source: &str) {
        if let Some(shader) = self.shaders.get_mut(&shader) {
            shader.source = source.to_string();
        }
    }

    fn compile_shader(&mut self, shader: u32) {
        if let Some(shader) = self.shaders.get_mut(&shader) {
            shader.compiled = syntax_check(&shader.source).is_ok();
        }
        self.calls.push(Call::CompileShader(shader));
    }

    fn shader_compile_status(&self, shader: u32) -> bool {
        self.shaders.get(&shader).map_or(false, |s| s.compiled)
    }

    fn shader_info_log(&self, shader: u32) -> String {
        let Some(shader) = self.shaders.get(&shader) else {
            return String::new();
        };

        match syntax_check(&shader.source) {
            Ok(()) => String::new(),
            Err(mut log) => {
                while log.len() < self.log_padding {
                    log.push_str(" more context");
                }
                log.push('\n');
                log.push('\0');
                log
            }
        }
    }

    fn delete_shader(&mut self, shader: u32) {
        self.shaders.remove(&shader);
        self.calls.push(Call::DeleteShader(shader));
    }

    fn create_program(&mut self) -> Result<u32, MockError> {
        let id = self.next_id();
        self.programs.insert(id, MockProgram::default());
        self.calls.push(Call::CreateProgram(id));
        Ok(id)
    }

    fn attach_shader(&mut self, program: u32, shader: u32) {
        if let Some(program) = self.programs.get_mut(&program) {
            program.attached.push(shader);
        }
        self.calls.push(Call::AttachShader(program, shader));
    }

    fn detach_shader(&mut self, program: u32, shader: u32) {
        if let Some(program) = self.programs.get_mut(&program) {
            program.attached.retain(|&s| s != shader);
        }
        self.calls.push(Call::DetachShader(program, shader));
    }

    fn link_program(&mut self, program_id: u32) {
        self.calls.push(Call::LinkProgram(program_id));

        let Some(program) = self.programs.get(&program_id) else {
            return;
        };

        let stages: Vec<&MockShader> = program
            .attached
            .iter()
            .filter_map(|id| self.shaders.get(id))
            .collect();
        let has = |stage: ShaderStage| stages.iter().any(|s| s.stage == stage && s.compiled);
        let linked = !self.fail_link && has(ShaderStage::Vertex) && has(ShaderStage::Fragment);
        let uniforms: HashSet<String> = stages
            .iter()
            .flat_map(|s| declared_uniforms(&s.source))
            .collect();

        if let Some(program) = self.programs.get_mut(&program_id) {
            program.linked = linked;
            program.uniforms = if linked { uniforms } else { HashSet::new() };
        }
    }

    fn program_link_status(&self, program: u32) -> bool {
        self.programs.get(&program).map_or(false, |p| p.linked)
    }

    fn program_info_log(&self, program: u32) -> String {
        if self.program_link_status(program) {
            String::new()
        } else {
            "error: linking with uncompiled/unspecialized shader".into()
        }
    }

    fn use_program(&mut self, program: Option<u32>) {
        self.calls.push(Call::UseProgram(program));
    }

    fn delete_program(&mut self, program: u32) {
        self.programs.remove(&program);
        self.calls.push(Call::DeleteProgram(program));
    }

    fn uniform_location(&self, program: u32, name: &str) -> Option<String> {
        self.uniform_lookups.set(self.uniform_lookups.get() + 1);
        self.programs
            .get(&program)
            .filter(|p| p.linked && p.uniforms.contains(name))
            .map(|_| name.to_string())
    }

    fn set_uniform_i32(&mut self, location: &String, value: i32) {
        self.calls.push(Call::SetI32(location.clone(), value));
    }

    fn set_uniform_f32(&mut self, location: &String, value: f32) {
        self.calls.push(Call::SetF32(location.clone(), value));
    }

    fn set_uniform_mat4(&mut self, location: &String, value: &[f32; 16]) {
        self.calls.push(Call::SetMat4(location.clone(), *value));
    }

    fn create_vertex_buffer(&mut self) -> Result<u32, MockError> {
        if self.fail_buffers {
            return Err(MockError("out of buffer objects".into()));
        }

        let id = self.next_id();
        self.buffers.insert(id, Vec::new());
        self.calls.push(Call::CreateVertexBuffer(id));
        Ok(id)
    }

    fn write_vertices(&mut self, buffer: &u32, vertices: &[Vertex]) {
        if let Some(contents) = self.buffers.get_mut(buffer) {
            *contents = vertices.to_vec();
        }
        self.calls.push(Call::WriteVertices(*buffer, vertices.len()));
    }

    fn delete_vertex_buffer(&mut self, buffer: u32) {
        self.buffers.remove(&buffer);
        self.calls.push(Call::DeleteVertexBuffer(buffer));
    }

    fn clear(&mut self, color: [f32; 4]) {
        self.calls.push(Call::Clear(color));
    }

    fn viewport(&mut self, width: u32, height: u32) {
        self.calls.push(Call::Viewport(width, height));
    }

    fn draw_triangles(&mut self, buffer: &u32, first: u32, count: u32) {
        self.calls.push(Call::DrawTriangles(*buffer, first, count));
    }
}
