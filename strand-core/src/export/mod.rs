//! Serializable snapshots of rig meshes over a run.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::host::SimulationContext;
use crate::render::RibbonMesh;
use crate::rig::Rig;

/// One mesh, split into per-attribute arrays.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshSnapshot {
    pub positions: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub colors: Vec<[f32; 4]>,
    pub indices: Vec<u32>,
}

impl From<&RibbonMesh> for MeshSnapshot {
    fn from(mesh: &RibbonMesh) -> Self {
        Self {
            positions: mesh.vertices.iter().map(|v| v.pos).collect(),
            uvs: mesh.vertices.iter().map(|v| v.uv).collect(),
            colors: mesh.vertices.iter().map(|v| v.color).collect(),
            indices: mesh.indices.clone(),
        }
    }
}

impl MeshSnapshot {
    pub fn quad_count(&self) -> usize { self.positions.len() / 4 }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameRecord {
    pub frame: u32,
    pub time: f32,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub hair: Option<MeshSnapshot>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub tail: Option<MeshSnapshot>,
}

impl FrameRecord {
    pub fn capture(frame: u32, ctx: &SimulationContext, rig: &Rig) -> Self {
        Self {
            frame,
            time: ctx.time,
            hair: rig.hair().map(|h| MeshSnapshot::from(h.mesh())),
            tail: rig.tail().map(|t| MeshSnapshot::from(t.mesh())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshExport {
    pub id: String,
    pub dt: f32,
    pub frames: Vec<FrameRecord>,
}

impl MeshExport {
    pub fn new(id: impl Into<String>, dt: f32) -> Self {
        Self { id: id.into(), dt, frames: Vec::new() }
    }

    pub fn push(&mut self, record: FrameRecord) { self.frames.push(record); }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = self.to_json()?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        log::info!("wrote {} frames to {}", self.frames.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{Facing, HostSnapshot};
    use crate::profile::schema::RigProfile;
    use crate::rig::RigAnchors;
    use glam::Affine2;

    #[test]
    fn snapshot_splits_vertex_attributes() {
        let mut mesh = RibbonMesh::default();
        mesh.push_quad(glam::Vec2::new(1.0, 2.0), glam::Vec2::splat(0.5), crate::render::Color::BLACK);
        let snap = MeshSnapshot::from(&mesh);
        assert_eq!(snap.quad_count(), 1);
        assert_eq!(snap.positions[0], mesh.vertices[0].pos);
        assert_eq!(snap.uvs[3], mesh.vertices[3].uv);
        assert_eq!(snap.colors[2], [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(snap.indices, mesh.indices);
    }

    #[test]
    fn export_records_each_frame() {
        let mut rig = Rig::from_profile(&RigProfile::default(), Affine2::IDENTITY, Facing::Right).unwrap();
        let mut ctx = SimulationContext::default();
        let mut export = MeshExport::new(rig.id(), ctx.dt);
        for frame in 0..3 {
            rig.advance(&ctx, &HostSnapshot::default(), &RigAnchors::default());
            export.push(FrameRecord::capture(frame, &ctx, &rig));
            ctx = ctx.next();
        }
        assert_eq!(export.frames.len(), 3);
        assert_eq!(export.frames[2].hair.as_ref().unwrap().quad_count(), 12);
        assert_eq!(export.frames[2].tail.as_ref().unwrap().quad_count(), 16);

        let json = export.to_json().unwrap();
        let back: MeshExport = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, "default");
        assert_eq!(back.frames.len(), 3);
    }

    #[test]
    fn missing_appendages_are_omitted() {
        let profile = RigProfile { tail: None, ..Default::default() };
        let rig = Rig::from_profile(&profile, Affine2::IDENTITY, Facing::Right).unwrap();
        let record = FrameRecord::capture(0, &SimulationContext::default(), &rig);
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("tail").is_none());
        assert!(json.get("hair").is_some());
    }
}
